use inkpad_core::{canvas::CanvasSettings, shape::Style};

const DOCUMENTATION: &str = r#"# Inkpad settings. You may edit this file, but be aware that formatting and comments will not
# be preserved, and all keys are case sensitive.

# [canvas] sets the size and background of new sessions. Colors are straight (non-premultiplied)
# RGBA with channels in [0, 1]. [style] is the stroke and fill new shapes start with.
# Stroke width must be positive.

# Examples:
# [canvas]
# width = 800
# height = 600
# background = { r = 1.0, g = 1.0, b = 1.0, a = 1.0 }
# [style]
# width = 4.0

"#;

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

#[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas: CanvasSettings,
    pub style: Style,
}
impl Settings {
    const FILENAME: &'static str = "settings.toml";
    /// Load from the user's preferences, or default if unavailable for some reason.
    #[must_use]
    pub fn load() -> Self {
        match preferences_dir() {
            None => {
                log::warn!("No preferences dir found, defaulting settings.");
                Self::default()
            }
            Some(mut dir) => {
                dir.push(Self::FILENAME);
                Self::load_or_default(&dir)
            }
        }
    }
    #[must_use]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        let settings: anyhow::Result<Self> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            Ok(Self::parse(&string)?)
        };
        settings.unwrap_or_else(|e| {
            log::warn!("Settings at {path:?} weren't available, defaulting: {e:#}");
            Self::default()
        })
    }
    pub fn parse(string: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(string)
    }
    /// Serialized form, prefixed with documentation.
    pub fn to_documented_string(&self) -> anyhow::Result<String> {
        let string = toml::ser::to_string_pretty(self)?;
        Ok(DOCUMENTATION.to_owned() + &string)
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let mut preferences =
            preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
        // Explicity do *not* create recursively. If not found, the user probably has a good reason.
        // Ignore errors (could already exist). Any real errors will be emitted by file access below.
        let _ = std::fs::DirBuilder::new().create(&preferences);

        preferences.push(Self::FILENAME);
        std::fs::write(preferences, self.to_documented_string()?)?;
        Ok(())
    }
}
