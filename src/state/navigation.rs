//! Screen navigation targets

use serde::{Deserialize, Serialize};

/// Screens the watch face can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    /// Timer read-out with the Start/Pause and Reset controls
    #[default]
    StartPage,
    /// Exercise duration picker (not implemented yet)
    SelectExerciseTime,
    /// Rest duration picker (not implemented yet)
    SelectRestTime,
}

impl Screen {
    /// Placeholder title shown by the screen
    pub fn title(&self) -> &'static str {
        match self {
            Screen::StartPage => "START PAGE",
            Screen::SelectExerciseTime => "SELECT EXERCISE TIME SCREEN",
            Screen::SelectRestTime => "SELECT REST TIME SCREEN",
        }
    }

    /// Whether the screen is a stub with no controls
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Screen::StartPage)
    }
}
