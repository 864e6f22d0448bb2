use url::Url;

use crate::html::escape;

const NATIVE_VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "webm", "ogg", "ogv", "mov", "m4v"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoPlayer {
    /// Played by the browser's own `<video>` element.
    Native(String),
    /// Handed to the remote host inside an `<iframe>`.
    Embedded(String),
}

impl VideoPlayer {
    pub fn for_url(video_url: &str) -> Self {
        if is_native_video(video_url) {
            VideoPlayer::Native(video_url.to_string())
        } else {
            VideoPlayer::Embedded(video_url.to_string())
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            VideoPlayer::Native(src) => format!(
                "<video class=\"video-player\" src=\"{}\" controls autoplay></video>",
                escape(src)
            ),
            VideoPlayer::Embedded(src) => format!(
                "<iframe class=\"video-player\" src=\"{}\" allowfullscreen></iframe>",
                escape(src)
            ),
        }
    }
}

fn is_native_video(video_url: &str) -> bool {
    match Url::parse(video_url) {
        Ok(parsed) => has_video_extension(parsed.path()),
        // No scheme: a local or site-relative file.
        Err(_) => true,
    }
}

fn has_video_extension(path: &str) -> bool {
    path.rsplit_once('.')
        .map(|(_, ext)| {
            NATIVE_VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Open/closed toggle around a single video URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoModal {
    url: String,
    open: bool,
}

impl VideoModal {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            open: false,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn player(&self) -> VideoPlayer {
        VideoPlayer::for_url(&self.url)
    }

    pub(crate) fn to_html(&self) -> String {
        format!(
            "<dialog id=\"video-dialog\" class=\"modal video-modal\"{open}>\n\
             <form method=\"dialog\"><button class=\"modal-close\" aria-label=\"Close\">&times;</button></form>\n\
             {player}\n</dialog>\n",
            open = if self.open { " open" } else { "" },
            player = self.player().to_html(),
        )
    }
}
