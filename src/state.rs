use crate::color::SeriesColors;
use crate::data::model::FileResult;

pub const DEFAULT_FIGURE_WIDTH: u32 = 10;
pub const DEFAULT_FIGURE_HEIGHT: u32 = 4;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// The three views of the loaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Interactive,
    Static,
    Table,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Interactive, Tab::Static, Tab::Table];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Interactive => "Interactive",
            Tab::Static => "Static",
            Tab::Table => "Table",
        }
    }

    /// Placeholder shown when no files are loaded.
    pub fn empty_message(self) -> &'static str {
        match self {
            Tab::Interactive => "Upload one or more files to view interactive residual plots.",
            Tab::Static => "Upload one or more files to view static residual plots.",
            Tab::Table => "Upload one or more files to inspect parsed tables.",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Results of the last upload, in selection order.
    pub files: Vec<FileResult>,

    /// Colour per column name across all loaded files.
    pub colors: SeriesColors,

    pub active_tab: Tab,

    /// Static chart size as typed, in hundreds of pixels.
    pub width_input: String,
    pub height_input: String,

    /// Show each file name above its card.
    pub show_filenames: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            colors: SeriesColors::default(),
            active_tab: Tab::default(),
            width_input: DEFAULT_FIGURE_WIDTH.to_string(),
            height_input: DEFAULT_FIGURE_HEIGHT.to_string(),
            show_filenames: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Replace the loaded files with a new batch.
    pub fn set_files(&mut self, files: Vec<FileResult>) {
        self.colors = SeriesColors::for_files(&files);
        self.files = files;
        self.status_message = None;
    }

    /// Drop every loaded file.
    pub fn clear(&mut self) {
        self.set_files(Vec::new());
    }

    pub fn set_figure_size(&mut self, width: u32, height: u32) {
        self.width_input = width.to_string();
        self.height_input = height.to_string();
    }

    pub fn figure_width(&self) -> u32 {
        sanitize_whole_number(&self.width_input, DEFAULT_FIGURE_WIDTH)
    }

    pub fn figure_height(&self) -> u32 {
        sanitize_whole_number(&self.height_input, DEFAULT_FIGURE_HEIGHT)
    }

    pub fn parsed_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_ok()).count()
    }

    /// One-line description of the current batch.
    pub fn summary(&self) -> String {
        let total = self.files.len();
        if total == 0 {
            return "No files selected.".to_string();
        }

        let ok = self.parsed_count();
        let failed = total - ok;
        if failed > 0 {
            format!("{total} files selected: {ok} parsed, {failed} failed.")
        } else {
            format!("{total} files selected and parsed.")
        }
    }
}

/// Parse a whole number of at least 1, falling back on anything else.
pub fn sanitize_whole_number(input: &str, fallback: u32) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(v) if v >= 1 => v,
        _ => fallback,
    }
}
