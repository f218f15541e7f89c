use viewdock::{Panel, ViewKind};

const SHEET_ROWS: usize = 6;
const SHEET_COLUMNS: usize = 4;

/// Concrete view payloads hosted by the shell.
#[derive(Debug)]
pub(crate) enum ShellPanel {
    Render { camera_distance: f32 },
    Spreadsheet { cells: Vec<Vec<String>> },
}

impl Panel for ShellPanel {
    fn create(kind: ViewKind) -> Self {
        match kind {
            ViewKind::Render => ShellPanel::Render {
                camera_distance: 10.0,
            },
            ViewKind::Spreadsheet => ShellPanel::Spreadsheet {
                cells: (0..SHEET_ROWS)
                    .map(|row| {
                        (0..SHEET_COLUMNS)
                            .map(|column| format!("r{row}c{column}"))
                            .collect()
                    })
                    .collect(),
            },
        }
    }

    fn kind(&self) -> ViewKind {
        match self {
            ShellPanel::Render { .. } => ViewKind::Render,
            ShellPanel::Spreadsheet { .. } => ViewKind::Spreadsheet,
        }
    }
}
