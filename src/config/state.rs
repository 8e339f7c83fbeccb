// src/config/state.rs

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    History,
    Risers,
    Chart,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::History, Tab::Risers, Tab::Chart];

    pub fn title(self) -> &'static str {
        match self {
            Tab::History => "History",
            Tab::Risers => "Top risers",
            Tab::Chart => "Chart",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Keywords selected in the left panel
    pub selected: Vec<String>,
    pub last_clicked: Option<usize>,
    pub tab: Tab,
    pub window_w: f32,
    pub window_h: f32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            last_clicked: None,
            tab: Tab::default(),
            window_w: 1100.0,
            window_h: 700.0,
        }
    }
}
