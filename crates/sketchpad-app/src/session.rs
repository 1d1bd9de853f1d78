//! Replays script commands against a canvas.
//!
//! Every failure of group, ungroup, load and save becomes a [`Notification`];
//! a session never stops on them.

use crate::script::Command;
use sketchpad_core::{Canvas, Notification, NotificationLevel, Shape, Storage};

/// A canvas together with the storage its save/load commands use.
pub struct Session<S: Storage> {
    canvas: Canvas,
    storage: S,
    notifications: Vec<Notification>,
}

impl<S: Storage> Session<S> {
    pub fn new(canvas: Canvas, storage: S) -> Self {
        Self {
            canvas,
            storage,
            notifications: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Every notification raised so far, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Check if any command failed with an error.
    pub fn has_errors(&self) -> bool {
        self.notifications
            .iter()
            .any(|n| n.level == NotificationLevel::Error)
    }

    /// Run one command and return the text to show for it, if any.
    pub fn execute(&mut self, command: &Command) -> Option<String> {
        match command {
            Command::Tool(tool) => self.canvas.activate_tool(*tool),
            Command::Corner(corner) => self.canvas.set_corner_style(*corner),
            Command::Select(mode) => self.canvas.set_selection_mode(*mode),
            Command::Down(point) => {
                self.canvas.pointer_down(*point);
            }
            Command::Move(point) => self.canvas.pointer_move(*point),
            Command::Up(point) => {
                self.canvas.pointer_up(*point);
            }
            Command::Click(point) => {
                self.canvas.click(*point);
            }
            Command::Group => {
                if let Err(err) = self.canvas.group_selected() {
                    return Some(self.notify(Notification::for_group_error(&err)));
                }
            }
            Command::Ungroup => {
                if let Err(err) = self.canvas.ungroup_selected() {
                    return Some(self.notify(Notification::new(
                        NotificationLevel::Error,
                        "Ungroup Error",
                        err.to_string(),
                    )));
                }
            }
            Command::Save(key) => {
                let note = match self.canvas.save(&self.storage, key) {
                    Ok(()) => Notification::save_succeeded(),
                    Err(err) => Notification::save_failed(&err),
                };
                return Some(self.notify(note));
            }
            Command::Load(key) => {
                let note = match self.canvas.load(&self.storage, key) {
                    Ok(_) => Notification::load_succeeded(),
                    Err(err) => Notification::load_failed(&err),
                };
                return Some(self.notify(note));
            }
            Command::List => return Some(describe_scene(&self.canvas).join("\n")),
        }
        None
    }

    /// Run every command in order, collecting their output.
    pub fn run<'a>(&mut self, commands: impl IntoIterator<Item = &'a Command>) -> Vec<String> {
        commands
            .into_iter()
            .filter_map(|command| self.execute(command))
            .collect()
    }

    fn notify(&mut self, note: Notification) -> String {
        match note.level {
            NotificationLevel::Info => log::info!("{}: {}", note.title, note.message),
            NotificationLevel::Warning => log::warn!("{}: {}", note.title, note.message),
            NotificationLevel::Error => log::error!("{}: {}", note.title, note.message),
        }
        let text = note.to_string();
        self.notifications.push(note);
        text
    }
}

/// One line per shape: `line (x, y) -> (x, y)` and so on.
pub fn describe_shape(shape: &Shape) -> String {
    match shape {
        Shape::Line(line) => format!("line {} -> {}", line.start, line.end),
        Shape::Rectangle(rect) => format!(
            "rectangle {} -> {} {}",
            rect.upper_left,
            rect.lower_right,
            rect.corner.as_str()
        ),
        Shape::Group(group) => format!(
            "group {} -> {} ({} members)",
            group.upper_left,
            group.lower_right,
            group.len()
        ),
    }
}

/// Top-level entries in order, followed by a selection summary.
pub fn describe_scene(canvas: &Canvas) -> Vec<String> {
    let registry = canvas.registry();
    let mut lines: Vec<String> = registry.all().map(describe_shape).collect();
    lines.push(format!(
        "{} shapes, {} selected",
        registry.len(),
        canvas.selection().len()
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use sketchpad_core::{FileStorage, MemoryStorage};

    fn session() -> Session<MemoryStorage> {
        Session::new(Canvas::new(), MemoryStorage::new())
    }

    const SCENE: &str = "
        tool line
        down 10 10
        move 60 60
        up 100 100
        tool rectangle
        down 50 50
        up 150 150
        select multi
        click 55 55
        click 50 100
    ";

    #[test]
    fn test_group_via_script() {
        let mut session = session();
        let script = format!("{SCENE}\ngroup\nlist");
        let output = session.run(&parse_script(&script).unwrap());

        assert_eq!(
            output,
            vec!["group (10, 10) -> (150, 150) (2 members)\n1 shapes, 0 selected".to_string()]
        );
        assert!(session.notifications().is_empty());
    }

    #[test]
    fn test_group_warning() {
        let mut session = session();
        let output = session.run(&parse_script("group").unwrap());

        assert_eq!(output, vec!["[WARN] Warning: Select at least two objects to group.".to_string()]);
        assert!(!session.has_errors());
    }

    #[test]
    fn test_save_and_load_notifications() {
        let mut session = session();
        let script = format!("{SCENE}\nsave scene\nload scene\nload missing");
        session.run(&parse_script(&script).unwrap());

        let titles: Vec<_> = session.notifications().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Save Successful", "Load Successful", "Load Error"]);
        assert!(session.has_errors());
        assert!(session.canvas().selection().is_empty());
        assert_eq!(session.canvas().registry().len(), 2);
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        let mut session = Session::new(Canvas::new(), storage);

        let script = "tool rectangle\ncorner rounded\ndown 0 0\nup 20 20\nsave shapes.xml";
        session.run(&parse_script(script).unwrap());

        let xml = std::fs::read_to_string(dir.path().join("shapes.xml")).unwrap();
        assert!(xml.contains("<corner>rounded</corner>"));
        assert!(session.storage().exists("shapes.xml").unwrap());
    }

    #[test]
    fn test_ungroup_is_silent_without_group() {
        let mut session = session();
        let output = session.run(&parse_script(&format!("{SCENE}\nungroup\nlist")).unwrap());
        assert_eq!(output.len(), 1);
        assert!(output[0].ends_with("2 shapes, 2 selected"));
    }
}
