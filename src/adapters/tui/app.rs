use super::{
    event::{AppEvent, EventHandler},
    widgets::InputField,
};
use crate::application::{Notice, Session, TodoController};
use crate::domain::Todo;
use color_eyre::Result;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Login,
    Signup,
    Tasks,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TasksFocus {
    List,
    Search,
    NewTitle,
    NewCategory,
    EditTitle,
    EditCategory,
}

pub struct App {
    session: Arc<Session>,
    controller: TodoController,

    // UI state
    screen: Screen,
    help_return: Screen,
    should_quit: bool,
    notice: Option<Notice>,

    // Auth screens
    login_email: InputField,
    login_password: InputField,
    signup_username: InputField,
    signup_email: InputField,
    signup_password: InputField,
    auth_focus: usize,

    // Tasks screen
    tasks_focus: TasksFocus,
    search: InputField,
    new_title: InputField,
    new_category: InputField,
    edit_title: InputField,
    edit_category: InputField,
    table_state: TableState,
    visible: Vec<Todo>,
}

impl App {
    pub fn new(session: Arc<Session>, controller: TodoController, logged_in: bool) -> Self {
        let mut app = Self {
            session,
            controller,
            screen: if logged_in {
                Screen::Tasks
            } else {
                Screen::Login
            },
            help_return: Screen::Tasks,
            should_quit: false,
            notice: None,
            login_email: InputField::new("Email", "you@example.com"),
            login_password: InputField::new("Password", "").masked(),
            signup_username: InputField::new("Username", "at least 3 characters"),
            signup_email: InputField::new("Email", "you@example.com"),
            signup_password: InputField::new("Password", "at least 6 characters").masked(),
            auth_focus: 0,
            tasks_focus: TasksFocus::List,
            search: InputField::new("Search", "Press / to search"),
            new_title: InputField::new("New todo", "Press n to add a todo"),
            new_category: InputField::new("Category", "General"),
            edit_title: InputField::new("Title", ""),
            edit_category: InputField::new("Category", ""),
            table_state: TableState::default(),
            visible: Vec::new(),
        };

        app.table_state.select(Some(0));
        app.apply_focus();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn initialize(&mut self) -> Result<()> {
        if self.screen == Screen::Tasks {
            self.notice = self.controller.refresh().await;
            self.refresh_visible().await;
        }
        Ok(())
    }

    // --- state helpers -----------------------------------------------------

    async fn refresh_visible(&mut self) {
        self.visible = self.controller.visible().await;

        if let Some(selected) = self.table_state.selected() {
            if selected >= self.visible.len() {
                let new_selection = if self.visible.is_empty() {
                    None
                } else {
                    Some(self.visible.len() - 1)
                };
                self.table_state.select(new_selection);
            }
        } else if !self.visible.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn selected_todo(&self) -> Option<Todo> {
        self.table_state
            .selected()
            .and_then(|i| self.visible.get(i))
            .cloned()
    }

    fn apply_focus(&mut self) {
        let auth = self.auth_focus;
        self.login_email
            .set_focused(self.screen == Screen::Login && auth == 0);
        self.login_password
            .set_focused(self.screen == Screen::Login && auth == 1);
        self.signup_username
            .set_focused(self.screen == Screen::Signup && auth == 0);
        self.signup_email
            .set_focused(self.screen == Screen::Signup && auth == 1);
        self.signup_password
            .set_focused(self.screen == Screen::Signup && auth == 2);

        let tasks = self.screen == Screen::Tasks;
        self.search
            .set_focused(tasks && self.tasks_focus == TasksFocus::Search);
        self.new_title
            .set_focused(tasks && self.tasks_focus == TasksFocus::NewTitle);
        self.new_category
            .set_focused(tasks && self.tasks_focus == TasksFocus::NewCategory);
        self.edit_title
            .set_focused(tasks && self.tasks_focus == TasksFocus::EditTitle);
        self.edit_category
            .set_focused(tasks && self.tasks_focus == TasksFocus::EditCategory);
    }

    /// A 401 on any todo operation drops the session and routes to login.
    async fn check_session(&mut self) {
        if self.controller.session_expired() {
            self.controller.acknowledge_session_expired();
            self.session.expire().await;
            self.login_password.clear();
            self.auth_focus = 0;
            self.screen = Screen::Login;
            self.apply_focus();
        }
    }

    // --- event handling ----------------------------------------------------

    pub async fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        if matches!(event, AppEvent::Quit) {
            self.should_quit = true;
            return Ok(());
        }

        match self.screen {
            Screen::Login | Screen::Signup => self.handle_auth_event(event).await,
            Screen::Tasks => self.handle_tasks_event(event).await,
            Screen::Help => {
                // Any key returns
                if !matches!(event, AppEvent::Tick) {
                    self.screen = self.help_return;
                    self.apply_focus();
                }
            }
        }

        self.check_session().await;
        Ok(())
    }

    fn auth_field_count(&self) -> usize {
        match self.screen {
            Screen::Signup => 3,
            _ => 2,
        }
    }

    fn focused_auth_field(&mut self) -> &mut InputField {
        match (self.screen, self.auth_focus) {
            (Screen::Login, 0) => &mut self.login_email,
            (Screen::Login, _) => &mut self.login_password,
            (Screen::Signup, 0) => &mut self.signup_username,
            (Screen::Signup, 1) => &mut self.signup_email,
            _ => &mut self.signup_password,
        }
    }

    async fn handle_auth_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Character(c) => self.focused_auth_field().insert_char(c),
            AppEvent::Backspace => self.focused_auth_field().delete_char(),
            AppEvent::Tab | AppEvent::Down => {
                self.auth_focus = (self.auth_focus + 1) % self.auth_field_count();
            }
            AppEvent::BackTab | AppEvent::Up => {
                let count = self.auth_field_count();
                self.auth_focus = (self.auth_focus + count - 1) % count;
            }
            AppEvent::ToggleAuthScreen => {
                self.screen = if self.screen == Screen::Login {
                    Screen::Signup
                } else {
                    Screen::Login
                };
                self.auth_focus = 0;
                self.notice = None;
            }
            AppEvent::Enter => {
                if self.screen == Screen::Login {
                    self.submit_login().await;
                } else {
                    self.submit_signup().await;
                }
            }
            AppEvent::Escape => {
                self.should_quit = true;
            }
            _ => {}
        }

        self.apply_focus();
    }

    async fn submit_login(&mut self) {
        let email = self.login_email.text().to_string();
        let password = self.login_password.text().to_string();

        match self.session.login(&email, &password).await {
            Ok(user) => {
                tracing::info!("Logged in as {}", user.username);
                self.notice = Some(Notice::Success("Logged in successfully!".to_string()));
                self.login_password.clear();
                self.screen = Screen::Tasks;
                self.tasks_focus = TasksFocus::List;

                if let Some(notice) = self.controller.refresh().await {
                    self.notice = Some(notice);
                }
                self.refresh_visible().await;
            }
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    async fn submit_signup(&mut self) {
        let username = self.signup_username.text().to_string();
        let email = self.signup_email.text().to_string();
        let password = self.signup_password.text().to_string();

        match self.session.signup(&username, &email, &password).await {
            Ok(_) => {
                self.notice = Some(Notice::Success(
                    "Signup successful! Please login.".to_string(),
                ));
                self.signup_password.clear();
                self.login_email.set_text(email);
                self.screen = Screen::Login;
                self.auth_focus = 1;
            }
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    async fn handle_tasks_event(&mut self, event: AppEvent) {
        // The confirmation modal swallows everything until answered.
        if self.controller.pending_delete().is_some() {
            match event {
                AppEvent::Character('y') | AppEvent::Character('Y') | AppEvent::Enter => {
                    self.notice = Some(self.controller.confirm_delete().await);
                    self.refresh_visible().await;
                }
                AppEvent::Character('n') | AppEvent::Character('N') | AppEvent::Escape => {
                    self.controller.cancel_delete();
                }
                _ => {}
            }
            return;
        }

        match self.tasks_focus {
            TasksFocus::List => self.handle_list_event(event).await,
            TasksFocus::Search => self.handle_search_event(event).await,
            TasksFocus::NewTitle | TasksFocus::NewCategory => {
                self.handle_new_todo_event(event).await
            }
            TasksFocus::EditTitle | TasksFocus::EditCategory => self.handle_edit_event(event).await,
        }

        self.apply_focus();
    }

    async fn handle_list_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Character('q') => self.should_quit = true,
            AppEvent::Character('?') => {
                self.help_return = Screen::Tasks;
                self.screen = Screen::Help;
            }
            AppEvent::Character('/') => self.tasks_focus = TasksFocus::Search,
            AppEvent::Character('n') => self.tasks_focus = TasksFocus::NewTitle,
            AppEvent::Character('f') => {
                self.controller.cycle_status_filter();
                self.refresh_visible().await;
            }
            AppEvent::Character('r') => {
                self.notice = self.controller.refresh().await;
                self.refresh_visible().await;
            }
            AppEvent::Character('e') => {
                if let Some(todo) = self.selected_todo() {
                    self.controller.start_edit(&todo);
                    self.edit_title.set_text(todo.title.clone());
                    self.edit_category.set_text(todo.category.clone());
                    self.tasks_focus = TasksFocus::EditTitle;
                }
            }
            AppEvent::Character(' ') => {
                if let Some(todo) = self.selected_todo() {
                    self.notice = Some(self.controller.toggle(todo.id).await);
                    self.refresh_visible().await;
                }
            }
            AppEvent::Character('d') => {
                if let Some(todo) = self.selected_todo() {
                    self.controller.request_delete(todo.id);
                }
            }
            AppEvent::Character('L') => self.logout().await,
            AppEvent::Character('j') | AppEvent::Down => self.select_next(),
            AppEvent::Character('k') | AppEvent::Up => self.select_previous(),
            AppEvent::Character('g') => {
                if !self.visible.is_empty() {
                    self.table_state.select(Some(0));
                }
            }
            AppEvent::Character('G') => {
                if !self.visible.is_empty() {
                    self.table_state.select(Some(self.visible.len() - 1));
                }
            }
            _ => {}
        }
    }

    async fn handle_search_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Character(c) => {
                self.search.insert_char(c);
                self.controller
                    .set_search_term(self.search.text().to_string());
                self.refresh_visible().await;
            }
            AppEvent::Backspace => {
                self.search.delete_char();
                self.controller
                    .set_search_term(self.search.text().to_string());
                self.refresh_visible().await;
            }
            AppEvent::Enter => {
                self.notice = self.controller.submit_search().await;
                self.refresh_visible().await;
                self.tasks_focus = TasksFocus::List;
            }
            AppEvent::Escape => self.tasks_focus = TasksFocus::List,
            _ => {}
        }
    }

    async fn handle_new_todo_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Character(c) => {
                self.focused_new_field().insert_char(c);
                self.sync_draft();
            }
            AppEvent::Backspace => {
                self.focused_new_field().delete_char();
                self.sync_draft();
            }
            AppEvent::Tab | AppEvent::BackTab => {
                self.tasks_focus = if self.tasks_focus == TasksFocus::NewTitle {
                    TasksFocus::NewCategory
                } else {
                    TasksFocus::NewTitle
                };
            }
            AppEvent::Enter => {
                let notice = self.controller.add_todo().await;
                if matches!(notice, Notice::Success(_)) {
                    self.new_title.clear();
                    self.new_category.clear();
                    self.tasks_focus = TasksFocus::NewTitle;
                }
                self.notice = Some(notice);
                self.refresh_visible().await;
            }
            AppEvent::Escape => self.tasks_focus = TasksFocus::List,
            _ => {}
        }
    }

    fn focused_new_field(&mut self) -> &mut InputField {
        if self.tasks_focus == TasksFocus::NewCategory {
            &mut self.new_category
        } else {
            &mut self.new_title
        }
    }

    fn sync_draft(&mut self) {
        let draft = self.controller.draft_mut();
        draft.title = self.new_title.text().to_string();
        draft.category = self.new_category.text().to_string();
    }

    async fn handle_edit_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Character(c) => {
                self.focused_edit_field().insert_char(c);
                self.sync_edit_buffer();
            }
            AppEvent::Backspace => {
                self.focused_edit_field().delete_char();
                self.sync_edit_buffer();
            }
            AppEvent::Tab | AppEvent::BackTab => {
                self.tasks_focus = if self.tasks_focus == TasksFocus::EditTitle {
                    TasksFocus::EditCategory
                } else {
                    TasksFocus::EditTitle
                };
            }
            AppEvent::Enter => {
                let notice = self.controller.save_edit().await;
                if matches!(notice, Notice::Success(_)) {
                    self.tasks_focus = TasksFocus::List;
                }
                // Warnings and failures stay in Editing with the buffer
                // intact for retry.
                self.notice = Some(notice);
                self.refresh_visible().await;
            }
            AppEvent::Escape => {
                self.controller.cancel_edit();
                self.tasks_focus = TasksFocus::List;
            }
            _ => {}
        }
    }

    fn focused_edit_field(&mut self) -> &mut InputField {
        if self.tasks_focus == TasksFocus::EditCategory {
            &mut self.edit_category
        } else {
            &mut self.edit_title
        }
    }

    fn sync_edit_buffer(&mut self) {
        let title = self.edit_title.text().to_string();
        let category = self.edit_category.text().to_string();
        if let Some(buffer) = self.controller.edit_buffer_mut() {
            buffer.title = title;
            buffer.category = category;
        }
    }

    async fn logout(&mut self) {
        match self.session.logout().await {
            Ok(()) => {
                self.notice = Some(Notice::Success("Logged out!".to_string()));
            }
            Err(e) => {
                tracing::warn!("Logout failed: {e}");
                self.notice = Some(Notice::Error("Logout failed".to_string()));
            }
        }

        self.visible.clear();
        self.login_password.clear();
        self.auth_focus = 0;
        self.screen = Screen::Login;
        self.apply_focus();
    }

    fn select_next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < self.visible.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    fn select_previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let previous = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(previous));
    }

    // --- rendering ---------------------------------------------------------

    pub fn render(&mut self, frame: &mut Frame) {
        match self.screen {
            Screen::Login | Screen::Signup => self.render_auth(frame),
            Screen::Tasks => self.render_tasks(frame),
            Screen::Help => self.render_help(frame),
        }
    }

    fn render_auth(&mut self, frame: &mut Frame) {
        let is_login = self.screen == Screen::Login;
        let title = if is_login { "Login" } else { "Sign Up" };
        let field_count = self.auth_field_count() as u16;

        let area = centered_rect(frame.area(), 50, field_count * 3 + 6);

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        frame.render_widget(block, area);

        let inner = area.inner(Margin {
            horizontal: 2,
            vertical: 1,
        });

        let mut constraints = vec![Constraint::Length(3); field_count as usize];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(2));
        let chunks = Layout::vertical(constraints).split(inner);

        if is_login {
            self.login_email.render(frame, chunks[0]);
            self.login_password.render(frame, chunks[1]);
        } else {
            self.signup_username.render(frame, chunks[0]);
            self.signup_email.render(frame, chunks[1]);
            self.signup_password.render(frame, chunks[2]);
        }

        let notice_area = chunks[chunks.len() - 2];
        if let Some(notice) = &self.notice {
            frame.render_widget(notice_line(notice), notice_area);
        }

        let hint = if is_login {
            "Enter: login | Tab: next field | Ctrl+S: sign up | Esc: quit"
        } else {
            "Enter: sign up | Tab: next field | Ctrl+S: back to login | Esc: quit"
        };
        let hint = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, chunks[chunks.len() - 1]);
    }

    fn render_tasks(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // search
            Constraint::Min(3),    // list
            Constraint::Length(3), // new todo form
            Constraint::Length(1), // status line
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

        self.search.render(frame, chunks[0]);
        self.render_table(frame, chunks[1]);

        let form = Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(chunks[2]);
        self.new_title.render(frame, form[0]);
        self.new_category.render(frame, form[1]);

        self.render_status_line(frame, chunks[3]);

        let footer = "j/k: navigate | Space: toggle | n: new | e: edit | d: delete | /: search | f: filter | r: refresh | L: logout | ?: help | q: quit";
        frame.render_widget(
            Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
            chunks[4],
        );

        if self.controller.edit_buffer().is_some() {
            self.render_edit_modal(frame);
        }

        if self.controller.pending_delete().is_some() {
            self.render_confirm_modal(frame);
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .visible
            .iter()
            .map(|todo| {
                let (status, color) = todo.status_display();
                let status_style = if color == "green" {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let title_style = if todo.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };

                Row::new(vec![
                    Cell::from(status).style(status_style),
                    Cell::from(todo.title.clone()).style(title_style),
                    Cell::from(todo.category.clone()).style(Style::default().fg(Color::Cyan)),
                    Cell::from(todo.created_display()).style(Style::default().fg(Color::Gray)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["Status", "Title", "Category", "Created"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title("Todos")
                .borders(Borders::ALL)
                .border_style(if self.tasks_focus == TasksFocus::List {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Gray)
                }),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!("Filter: {} ", self.controller.status_filter().label()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("({} shown) ", self.visible.len()),
                Style::default().fg(Color::Gray),
            ),
        ];

        if let Some(notice) = &self.notice {
            let style = match notice {
                Notice::Success(_) => Style::default().fg(Color::Green),
                Notice::Warning(_) => Style::default().fg(Color::Yellow),
                Notice::Error(_) => Style::default().fg(Color::Red),
            };
            spans.push(Span::styled(notice.message().to_string(), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_edit_modal(&mut self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 60, 10);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title("Edit todo")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow));
        frame.render_widget(block, area);

        let inner = area.inner(Margin {
            horizontal: 2,
            vertical: 1,
        });
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

        self.edit_title.render(frame, chunks[0]);
        self.edit_category.render(frame, chunks[1]);

        let hint = Paragraph::new("Enter: save | Tab: switch field | Esc: cancel")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[2]);
    }

    fn render_confirm_modal(&self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 40, 5);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title("Confirm")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red));

        let text = Paragraph::new("Delete this todo? (y/n)")
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(text, area);
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 64, 18);

        let lines = vec![
            Line::from("Task list"),
            Line::from("  j/k or arrows  move selection"),
            Line::from("  g / G          first / last todo"),
            Line::from("  Space          toggle completion"),
            Line::from("  n              new todo"),
            Line::from("  e              edit selected todo"),
            Line::from("  d              delete selected todo (asks first)"),
            Line::from("  /              search (Enter searches the server)"),
            Line::from("  f              cycle All / Completed / Pending"),
            Line::from("  r              refresh from the server"),
            Line::from("  L              logout"),
            Line::from(""),
            Line::from("Inputs: Enter submits, Esc leaves, Tab switches fields"),
            Line::from(""),
            Line::from("Press any key to close"),
        ];

        let help = Paragraph::new(lines).block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(help, area);
    }
}

fn notice_line(notice: &Notice) -> Paragraph<'_> {
    let style = match notice {
        Notice::Success(_) => Style::default().fg(Color::Green),
        Notice::Warning(_) => Style::default().fg(Color::Yellow),
        Notice::Error(_) => Style::default().fg(Color::Red),
    };

    Paragraph::new(notice.message())
        .style(style)
        .alignment(Alignment::Center)
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub async fn run_tui(mut app: App) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut events = EventHandler::new();

    app.initialize().await?;

    let result = loop {
        if let Err(e) = terminal.draw(|frame| app.render(frame)) {
            break Err(e.into());
        }

        match events.next_event().await {
            Ok(event) => {
                if let Err(e) = app.handle_event(event).await {
                    break Err(e);
                }
            }
            Err(e) => break Err(e),
        }

        if app.should_quit() || events.should_quit() {
            break Ok(());
        }
    };

    restore_terminal(terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
