//! Platform capture devices as FFmpeg inputs

use crate::domain::media::DeviceInput;

/// FFmpeg input devices used for display, system audio and microphone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureBackend {
    pub display: DeviceInput,
    /// `None` when the platform has no loopback device
    pub system_audio: Option<DeviceInput>,
    pub microphone: DeviceInput,
}

impl CaptureBackend {
    /// Defaults for the platform this binary was built for
    pub fn for_current_platform() -> Self {
        if cfg!(target_os = "macos") {
            Self::avfoundation()
        } else if cfg!(target_os = "windows") {
            Self::gdigrab()
        } else {
            Self::x11grab(std::env::var("DISPLAY").ok())
        }
    }

    /// X11 screen grab with PulseAudio (or PipeWire's pulse server)
    pub fn x11grab(display: Option<String>) -> Self {
        let display = display
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| ":0.0".to_string());
        Self {
            display: DeviceInput::new("x11grab", display),
            system_audio: Some(DeviceInput::new("pulse", "@DEFAULT_MONITOR@")),
            microphone: DeviceInput::new("pulse", "default"),
        }
    }

    pub fn avfoundation() -> Self {
        Self {
            display: DeviceInput::new("avfoundation", "Capture screen 0:none"),
            system_audio: None,
            microphone: DeviceInput::new("avfoundation", "none:default"),
        }
    }

    pub fn gdigrab() -> Self {
        Self {
            display: DeviceInput::new("gdigrab", "desktop"),
            system_audio: None,
            microphone: DeviceInput::new("dshow", "audio=default"),
        }
    }

    /// Replace the display device name, keeping the driver
    pub fn with_display(mut self, device: impl Into<String>) -> Self {
        self.display = DeviceInput::new(self.display.driver.clone(), device);
        self
    }

    /// Drop the system audio input
    pub fn without_system_audio(mut self) -> Self {
        self.system_audio = None;
        self
    }
}
