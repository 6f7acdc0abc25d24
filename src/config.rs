use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub layout: LayoutConfig,
    pub theme: ThemeConfig,
    pub compose: ComposeConfig,
    pub downloads: DownloadConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the inbox backend
    pub base_url: String,
    /// Path returning the thread collection
    pub threads_path: String,
    /// Path prefix for thread summaries (`{prefix}/{thread_id}[/{style}]`)
    pub summarize_path: String,
    /// Path prefix for smart replies (`{prefix}/{thread_id}`)
    pub smart_reply_path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Sender prefilled in the new-email modal
    pub default_sender: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Where downloaded attachments are written
    pub dir: String,
    /// Open the file with xdg-open after download
    pub open_after_download: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width percentage of the thread list pane
    pub threads_width: u16,
    /// Date column width in characters
    pub date_width: usize,
}

/// Semantic theme configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    // Base colors
    pub bg_panel: String,
    pub bg_element: String,
    pub fg: String,
    pub fg_muted: String,
    pub fg_subtle: String,

    // Border colors
    pub border: String,
    pub border_subtle: String,
    pub border_active: String,

    // Accent colors
    pub primary: String,

    // Semantic colors
    pub success: String,
    pub error: String,

    // Coverage buckets
    pub coverage_low: String,
    pub coverage_mid: String,
    pub coverage_high: String,

    pub selected_bg: String,
    pub attachment: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            threads_path: "/get_threads".to_string(),
            summarize_path: "/summarize".to_string(),
            smart_reply_path: "/get_sop".to_string(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: "~/Downloads".to_string(),
            open_after_download: true,
        }
    }
}

impl DownloadConfig {
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.dir).into_owned())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            threads_width: 30,
            date_width: 16,
        }
    }
}

/// Warm dark theme with a red accent
impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            // Base colors
            bg_panel: "#262422".to_string(),
            bg_element: "#393634".to_string(),
            fg: "#f7f7f5".to_string(),
            fg_muted: "#8c8985".to_string(),
            fg_subtle: "#b8b5b0".to_string(),

            // Border colors
            border: "#524f4c".to_string(),
            border_subtle: "#393634".to_string(),
            border_active: "#e5484d".to_string(), // primary

            // Accent colors
            primary: "#e5484d".to_string(),

            // Semantic colors
            success: "#52c41a".to_string(),
            error: "#ff4d4f".to_string(),

            coverage_low: "red".to_string(),
            coverage_mid: "yellow".to_string(),
            coverage_high: "green".to_string(),

            selected_bg: "#393634".to_string(), // bg_element
            attachment: "#b48ead".to_string(),  // magenta
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("inboxtui/config.toml"))
            .unwrap_or_else(|| PathBuf::from(shellexpand::tilde("~/.config/inboxtui/config.toml").into_owned()))
    }

    pub fn load() -> Self {
        let config_path = Self::path();

        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return config,
                    Err(e) => warn!("Config parse error: {}", e),
                },
                Err(e) => warn!("Config read error: {}", e),
            }
        }

        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl ThemeConfig {
    pub fn bg_panel(&self) -> ratatui::style::Color {
        parse_color(&self.bg_panel)
    }
    pub fn bg_element(&self) -> ratatui::style::Color {
        parse_color(&self.bg_element)
    }
    pub fn fg(&self) -> ratatui::style::Color {
        parse_color(&self.fg)
    }
    pub fn fg_muted(&self) -> ratatui::style::Color {
        parse_color(&self.fg_muted)
    }
    pub fn fg_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.fg_subtle)
    }
    pub fn border(&self) -> ratatui::style::Color {
        parse_color(&self.border)
    }
    pub fn border_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.border_subtle)
    }
    pub fn border_active(&self) -> ratatui::style::Color {
        parse_color(&self.border_active)
    }
    pub fn primary(&self) -> ratatui::style::Color {
        parse_color(&self.primary)
    }
    pub fn success(&self) -> ratatui::style::Color {
        parse_color(&self.success)
    }
    pub fn error(&self) -> ratatui::style::Color {
        parse_color(&self.error)
    }
    pub fn selected_bg(&self) -> ratatui::style::Color {
        parse_color(&self.selected_bg)
    }
    pub fn attachment(&self) -> ratatui::style::Color {
        parse_color(&self.attachment)
    }

    /// Colour for a coverage bucket; hidden buckets get none
    pub fn coverage(&self, style: crate::inbox::CoverageStyle) -> Option<ratatui::style::Color> {
        use crate::inbox::CoverageStyle;
        match style {
            CoverageStyle::Red => Some(parse_color(&self.coverage_low)),
            CoverageStyle::Yellow => Some(parse_color(&self.coverage_mid)),
            CoverageStyle::Green => Some(parse_color(&self.coverage_high)),
            CoverageStyle::Hidden => None,
        }
    }
}

/// Parse color string to ratatui Color
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    // Try hex first (#RRGGBB)
    if s.starts_with('#') && s.len() == 7 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[1..3], 16),
            u8::from_str_radix(&s[3..5], 16),
            u8::from_str_radix(&s[5..7], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }

    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::White,
    }
}
