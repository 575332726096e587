use crate::commands::Session;
use crate::responses;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

/// One bubble in the conversation.
#[derive(Debug, Clone)]
pub struct Entry {
    pub speaker: Speaker,
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub session: Session,
    pub bot_name: String,
    pub transcript: Vec<Entry>,
    pub input_buffer: String,
    /// Lines scrolled back from the newest message.
    pub scroll: u16,
    pub should_quit: bool,
}

impl App {
    /// Creates the app with the greeting (and any load error) already shown.
    pub fn new(mut session: Session, bot_name: &str) -> App {
        let mut transcript = vec![Entry {
            speaker: Speaker::Bot,
            text: responses::welcome(bot_name),
            is_error: false,
        }];
        if let Some(err) = session.take_load_error() {
            transcript.push(Entry { speaker: Speaker::Bot, text: err, is_error: true });
        }

        App {
            session,
            bot_name: bot_name.to_string(),
            transcript,
            input_buffer: String::new(),
            scroll: 0,
            should_quit: false,
        }
    }

    /// Sends the input line to the session and records both sides.
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input_buffer);
        if line.trim().is_empty() {
            return;
        }
        let response = self.session.handle(&line);

        self.transcript.push(Entry { speaker: Speaker::User, text: line, is_error: false });
        self.transcript.push(Entry {
            speaker: Speaker::Bot,
            text: response.message.clone(),
            is_error: response.is_error(),
        });
        self.scroll = 0;
        if response.is_exit() {
            self.should_quit = true;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStore;

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::open(FileStore::new(dir.path().join("tasks.txt")));
        (dir, App::new(session, "TaskBot"))
    }

    #[test]
    fn submit_records_both_sides() {
        let (_dir, mut app) = app();
        app.input_buffer = "todo water plants".into();
        app.submit();

        assert!(app.input_buffer.is_empty());
        assert_eq!(app.transcript.len(), 3);
        assert_eq!(app.transcript[1].speaker, Speaker::User);
        assert!(app.transcript[2].text.contains("[T][ ] water plants"));
        assert_eq!(app.session.tasks().count(), 1);
    }

    #[test]
    fn errors_are_flagged_and_bye_quits() {
        let (_dir, mut app) = app();
        app.input_buffer = "mark 5".into();
        app.submit();
        assert!(app.transcript.last().unwrap().is_error);
        assert!(!app.should_quit);

        app.input_buffer = "bye".into();
        app.submit();
        assert!(app.should_quit);
    }

    #[test]
    fn blank_input_is_ignored() {
        let (_dir, mut app) = app();
        app.input_buffer = "   ".into();
        app.submit();
        assert_eq!(app.transcript.len(), 1);
    }
}
