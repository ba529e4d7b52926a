use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::load_files;
use crate::state::{AppState, DEFAULT_FIGURE_HEIGHT, DEFAULT_FIGURE_WIDTH};

/// Viewer for OpenFOAM `residuals.dat` logs.
///
/// Files given on the command line are loaded at start-up; more can be
/// picked from the File menu.
#[derive(Debug, Clone, Parser)]
#[command(name = "foam-residuals", version, about)]
pub struct Cli {
    /// Residual files to load at start-up
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Static chart width, in hundreds of pixels
    #[arg(long, default_value_t = DEFAULT_FIGURE_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Static chart height, in hundreds of pixels
    #[arg(long, default_value_t = DEFAULT_FIGURE_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Show each file name above its charts
    #[arg(long)]
    pub show_filenames: bool,
}

impl Cli {
    /// Build the start-up state, loading any files named on the command line.
    pub fn initial_state(&self) -> AppState {
        let mut state = AppState::default();
        state.set_figure_size(self.width, self.height);
        state.show_filenames = self.show_filenames;
        if !self.files.is_empty() {
            state.set_files(load_files(&self.files));
            log::info!("{}", state.summary());
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["foam-residuals"]).unwrap();
        assert!(cli.files.is_empty());
        assert_eq!(cli.width, DEFAULT_FIGURE_WIDTH);
        assert_eq!(cli.height, DEFAULT_FIGURE_HEIGHT);
        assert!(!cli.show_filenames);

        let state = cli.initial_state();
        assert!(state.files.is_empty());
        assert_eq!(state.figure_width(), DEFAULT_FIGURE_WIDTH);
    }

    #[test]
    fn test_zero_width_is_rejected() {
        assert!(Cli::try_parse_from(["foam-residuals", "--width", "0"]).is_err());
    }

    #[test]
    fn test_files_are_loaded_at_start_up() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("residuals.dat");
        std::fs::write(&path, "# Residuals\n# Time p Ux\n1 1 1\n2 0.1 0.2\n").unwrap();

        let args: Vec<std::ffi::OsString> = vec![
            "foam-residuals".into(),
            path.clone().into_os_string(),
            "--width".into(),
            "12".into(),
            "--show-filenames".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let state = cli.initial_state();

        assert_eq!(state.files.len(), 1);
        assert!(state.files[0].is_ok());
        assert_eq!(state.figure_width(), 12);
        assert!(state.show_filenames);
        assert_eq!(state.summary(), "1 files selected and parsed.");
    }
}
