//! Loading and rendering options

/// Options for reading a table
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: char,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

/// What to print for each cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Evaluated value, or an error placeholder
    #[default]
    Evaluated,
    /// Raw cell text as loaded
    Raw,
}

/// Options for rendering a table
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Field delimiter (default: comma)
    pub delimiter: char,
    pub mode: RenderMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            mode: RenderMode::Evaluated,
        }
    }
}
