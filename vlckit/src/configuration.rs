//! Engine start-up options.

use std::ffi::CString;

use bitflags::bitflags;

use crate::error::Result;

bitflags! {
    /// Boolean engine options.
    #[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
    pub struct Switches: u32 {
        const NO_COLOR = 1 << 0;
        const NO_OSD = 1 << 1;
        const NO_VIDEO_TITLE_SHOW = 1 << 2;
        const NO_STATS = 1 << 3;
        const NO_SNAPSHOT_PREVIEW = 1 << 4;
        const AVCODEC_FAST = 1 << 5;
        /// Pause on the last frame instead of stopping.
        const PLAY_AND_PAUSE = 1 << 6;
        const NO_SOUT_KEEP = 1 << 7;
    }
}

const SWITCH_OPTIONS: [(Switches, &str); 8] = [
    (Switches::NO_COLOR, "--no-color"),
    (Switches::NO_OSD, "--no-osd"),
    (Switches::NO_VIDEO_TITLE_SHOW, "--no-video-title-show"),
    (Switches::NO_STATS, "--no-stats"),
    (Switches::NO_SNAPSHOT_PREVIEW, "--no-snapshot-preview"),
    (Switches::AVCODEC_FAST, "--avcodec-fast"),
    (Switches::PLAY_AND_PAUSE, "--play-and-pause"),
    (Switches::NO_SOUT_KEEP, "--no-sout-keep"),
];

/// The options an engine instance is created with.
///
/// Options only take effect at [`Instance::new`](crate::instance::Instance::new).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub switches: Switches,
    pub text_renderer: Option<String>,
    pub avi_index: Option<u32>,
    pub verbosity: Option<u8>,
    pub video_output: Option<String>,
    pub extra_interface: Option<String>,
    /// Raw options appended after everything else, e.g. `"--network-caching=300"`.
    pub extra: Vec<String>,
}

impl Configuration {
    /// The option set used on mobile targets.
    pub fn mobile() -> Self {
        Self {
            switches: Switches::NO_COLOR
                | Switches::NO_OSD
                | Switches::NO_VIDEO_TITLE_SHOW
                | Switches::NO_STATS
                | Switches::NO_SNAPSHOT_PREVIEW
                | Switches::AVCODEC_FAST,
            text_renderer: Some("freetype".to_owned()),
            avi_index: Some(3),
            ..Self::default()
        }
    }

    /// Serializes the configuration to engine command-line options.
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = SWITCH_OPTIONS
            .iter()
            .filter(|(switch, _)| self.switches.contains(*switch))
            .map(|(_, option)| (*option).to_owned())
            .collect();

        if let Some(renderer) = &self.text_renderer {
            args.push(format!("--text-renderer={renderer}"));
        }
        if let Some(index) = self.avi_index {
            args.push(format!("--avi-index={index}"));
        }
        if let Some(level) = self.verbosity {
            args.push(format!("--verbose={level}"));
        }
        if let Some(vout) = &self.video_output {
            args.push(format!("--vout={vout}"));
        }
        if let Some(intf) = &self.extra_interface {
            args.push(format!("--extraintf={intf}"));
        }
        args.extend(self.extra.iter().cloned());
        args
    }

    pub(crate) fn to_c_args(&self) -> Result<Vec<CString>> {
        self.to_args()
            .into_iter()
            .map(|arg| CString::new(arg).map_err(Into::into))
            .collect()
    }
}
