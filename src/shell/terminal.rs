// Line-oriented terminal front end.
//
// Purpose
// - Drive the attendance and personal information views from stdin, one command per line.
//
// Responsibilities
// - Parse commands without touching I/O, so parsing is testable.
// - Answer the views' dialogs and print their notices.

use attendance::modules::attendance::core::entry_fields::EntryFields;
use attendance::modules::attendance::core::record::AttendanceRecord;
use attendance::modules::attendance::core::search_criteria::SearchCriteria;
use attendance::modules::attendance::use_cases::browse_records::dialogs_port::{AttendanceDialogs, FormMode};
use attendance::modules::attendance::use_cases::browse_records::view::AttendanceView;
use attendance::modules::attendance::use_cases::synchronize_records::api_port::AttendanceApi;
use attendance::modules::personal_info::core::profile::PersonalInfo;
use attendance::modules::personal_info::use_cases::manage_profile::api_port::PersonalInfoApi;
use attendance::modules::personal_info::use_cases::manage_profile::view::PersonalInfoView;
use attendance::shared::core::calendar_date::{InvalidDate, format_wire_date, parse_wire_date};
use attendance::shared::infrastructure::notifications::{Notice, NoticeLevel, Notifier};
use attendance::shell::state::AppState;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::warn;

const HELP: &str = "\
Commands:
  list                          reload and show all records
  search <start|-> <end|->      show records between two dates (YYYY-MM-DD, inclusive)
  clear                         clear the search
  add                           add a record
  edit <id>                     update a record
  delete <id>                   delete a record
  quick <id> <date> <in> [out]  quick-edit a record in place
  show <id>                     fetch one record from the server
  profile                       show your personal information
  profile-edit                  edit your personal information
  help                          show this help
  quit                          leave
In forms, Enter keeps the value in brackets, `-` clears it and `cancel` aborts.";

const CANCEL_INPUT: &str = "cancel";
const CLEAR_INPUT: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(SearchCriteria),
    Clear,
    Add,
    Edit(String),
    Delete(String),
    Quick { id: String, fields: EntryFields },
    Show(String),
    Profile,
    ProfileEdit,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Date(#[from] InvalidDate),
}

/// Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (name, args) {
        ("list", []) => Command::List,
        ("search", [start, end]) => Command::Search(SearchCriteria::between(bound(start)?, bound(end)?)),
        ("search", _) => return Err(CommandError::Usage("search <start|-> <end|->")),
        ("clear", []) => Command::Clear,
        ("add", []) => Command::Add,
        ("edit", [id]) => Command::Edit(id.to_string()),
        ("edit", _) => return Err(CommandError::Usage("edit <id>")),
        ("delete", [id]) => Command::Delete(id.to_string()),
        ("delete", _) => return Err(CommandError::Usage("delete <id>")),
        ("quick", [id, date, check_in, rest @ ..]) if rest.len() <= 1 => Command::Quick {
            id: id.to_string(),
            fields: EntryFields::new(Some(parse_wire_date(date)?), *check_in, rest.first().copied().unwrap_or("")),
        },
        ("quick", _) => return Err(CommandError::Usage("quick <id> <date> <in> [out]")),
        ("show", [id]) => Command::Show(id.to_string()),
        ("show", _) => return Err(CommandError::Usage("show <id>")),
        ("profile", []) => Command::Profile,
        ("profile-edit", []) => Command::ProfileEdit,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => return Err(CommandError::Unknown(line.trim().to_string())),
    };
    Ok(Some(command))
}

fn bound(raw: &str) -> Result<Option<NaiveDate>, InvalidDate> {
    if raw == CLEAR_INPUT {
        return Ok(None);
    }
    parse_wire_date(raw).map(Some)
}

pub fn render_rows(rows: &[AttendanceRecord]) -> String {
    if rows.is_empty() {
        return "No attendance records.".to_string();
    }
    let mut out = format!("{:<38} {:<10} {:<5} {:<5}", "ID", "DATE", "IN", "OUT");
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(row));
    }
    out
}

fn render_row(row: &AttendanceRecord) -> String {
    format!(
        "{:<38} {:<10} {:<5} {:<5}",
        row.id,
        format_wire_date(row.check_in_date),
        row.check_in_time,
        row.check_out_time.as_deref().unwrap_or("-")
    )
}

fn render_profile(profile: &PersonalInfo) -> String {
    let date = |value: Option<NaiveDate>| value.map(format_wire_date).unwrap_or_default();
    [
        ("Employee ID", profile.employee_id.clone()),
        ("Full name", profile.full_name.clone()),
        ("Email", profile.email.clone()),
        ("Phone", profile.phone.clone()),
        ("Department", profile.department.clone()),
        ("Job title", profile.job_title.clone()),
        ("Date of birth", date(profile.date_of_birth)),
        ("Date of joining", date(profile.date_of_joining)),
        ("Manager", profile.manager.clone()),
        ("Employee type", profile.employee_type.clone()),
        ("Address", profile.address.clone()),
    ]
    .iter()
    .map(|(label, value)| format!("{label:<16} {value}"))
    .collect::<Vec<_>>()
    .join("\n")
}

type TextField = (&'static str, fn(&mut PersonalInfo) -> &mut String);

const PROFILE_TEXT_FIELDS: [TextField; 9] = [
    ("Employee ID", |p| &mut p.employee_id),
    ("Full name", |p| &mut p.full_name),
    ("Email", |p| &mut p.email),
    ("Phone", |p| &mut p.phone),
    ("Department", |p| &mut p.department),
    ("Job title", |p| &mut p.job_title),
    ("Manager", |p| &mut p.manager),
    ("Employee type", |p| &mut p.employee_type),
    ("Address", |p| &mut p.address),
];

/// Stdin/stdout. Prompts and notices go to stdout, logs go to stderr.
pub struct Console {
    input: Mutex<Lines<BufReader<Stdin>>>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    fn say(&self, text: impl std::fmt::Display) {
        println!("{text}");
    }

    /// `None` on end of input.
    async fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
        match self.input.lock().await.next_line().await {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "failed to read from stdin");
                None
            }
        }
    }

    /// Asks for one form value. `None` aborts the form.
    async fn ask(&self, label: &str, current: &str) -> Option<String> {
        let answer = self.read_line(&format!("{label} [{current}]: ")).await?;
        match answer.trim() {
            CANCEL_INPUT => None,
            "" => Some(current.to_string()),
            CLEAR_INPUT => Some(String::new()),
            value => Some(value.to_string()),
        }
    }

    async fn ask_date(&self, label: &str, current: Option<NaiveDate>) -> Option<Option<NaiveDate>> {
        let current_text = current.map(format_wire_date).unwrap_or_default();
        let answer = self.ask(label, &current_text).await?;
        if answer.is_empty() {
            return Some(None);
        }
        match parse_wire_date(&answer) {
            Ok(date) => Some(Some(date)),
            Err(err) => {
                self.say(err);
                Some(current)
            }
        }
    }
}

#[async_trait]
impl AttendanceDialogs for Console {
    async fn open_form(&self, mode: FormMode) -> Option<EntryFields> {
        self.say(mode.title());
        let initial = mode.initial_fields();
        let check_in_date = self.ask_date("Check-in date (YYYY-MM-DD)", initial.check_in_date).await?;
        let check_in_time = self.ask("Check-in time (HH:MM)", &initial.check_in_time).await?;
        let check_out_time = self.ask("Check-out time (HH:MM, optional)", &initial.check_out_time).await?;
        Some(EntryFields::new(check_in_date, check_in_time, check_out_time))
    }

    async fn confirm(&self, question: &str) -> bool {
        self.read_line(&format!("{question} [y/N]: "))
            .await
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
    }
}

impl Notifier for Console {
    fn show(&self, notice: Notice) {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        self.say(format!("[{tag}] {}", notice.message));
    }
}

struct Session {
    state: AppState,
    console: Arc<Console>,
    attendance: AttendanceView<dyn AttendanceApi>,
    profile: PersonalInfoView<dyn PersonalInfoApi>,
}

pub async fn run(state: AppState) -> anyhow::Result<()> {
    let console = Arc::new(Console::new());
    let attendance = AttendanceView::attach(state.attendance.clone(), console.clone())
        .with_notice_duration(state.notice_duration);
    let profile = PersonalInfoView::new(state.personal_info.clone(), console.clone())
        .with_notice_duration(state.notice_duration);
    let session = Session {
        state,
        console,
        attendance,
        profile,
    };

    session.console.say(HELP);
    session.attendance.init().await;
    session.console.say(render_rows(&session.attendance.rows()));

    while let Some(line) = session.console.read_line("> ").await {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => session.execute(command).await,
            Err(err) => session.console.say(err),
        }
    }

    session.attendance.teardown();
    Ok(())
}

impl Session {
    async fn execute(&self, command: Command) {
        let console = self.console.as_ref();
        match command {
            Command::List => {
                self.attendance.init().await;
                console.say(render_rows(&self.attendance.rows()));
            }
            Command::Search(criteria) => {
                self.attendance.search(criteria).await;
                console.say(render_rows(&self.attendance.rows()));
            }
            Command::Clear => {
                self.attendance.clear_search().await;
                console.say(render_rows(&self.attendance.rows()));
            }
            Command::Add => {
                self.attendance.open_add_dialog(console).await;
            }
            Command::Edit(id) => match self.displayed(&id) {
                Some(record) => {
                    self.attendance.open_update_dialog(console, &record).await;
                }
                None => console.say(format!("No attendance record `{id}` is displayed")),
            },
            Command::Delete(id) => {
                self.attendance.delete_record(console, &id).await;
            }
            Command::Quick { id, fields } => {
                if !self.attendance.start_quick_edit(&id).await {
                    console.say(format!("No attendance record `{id}` is displayed"));
                    return;
                }
                self.attendance.edit_quick_fields(&id, |editing| *editing = fields).await;
                if !self.attendance.save_quick_edit(&id).await.is_completed() {
                    self.attendance.cancel_quick_edit(&id).await;
                }
            }
            Command::Show(id) => match self.state.attendance.get_by_id(&id).await {
                Ok(record) => console.say(render_rows(&[record])),
                Err(err) => console.say(err),
            },
            Command::Profile => {
                if self.profile.load().await.is_completed() {
                    console.say(render_profile(&self.profile.form().await));
                }
            }
            Command::ProfileEdit => self.edit_profile().await,
            Command::Help => console.say(HELP),
            Command::Quit => {}
        }
    }

    fn displayed(&self, id: &str) -> Option<AttendanceRecord> {
        self.attendance.rows().into_iter().find(|row| row.id == id)
    }

    async fn edit_profile(&self) {
        let console = self.console.as_ref();
        self.profile.load().await;
        self.profile.enable_edit_mode().await;

        let mut form = self.profile.form().await;
        for (label, field) in PROFILE_TEXT_FIELDS {
            let Some(value) = console.ask(label, field(&mut form)).await else {
                self.profile.cancel_edit().await;
                return;
            };
            *field(&mut form) = value;
        }
        for (label, field) in [
            ("Date of birth (YYYY-MM-DD)", &mut form.date_of_birth),
            ("Date of joining (YYYY-MM-DD)", &mut form.date_of_joining),
        ] {
            let Some(value) = console.ask_date(label, *field).await else {
                self.profile.cancel_edit().await;
                return;
            };
            *field = value;
        }

        self.profile.edit(|editing| *editing = form).await;
        if console.confirm("Save your personal information?").await {
            if !self.profile.save().await.is_completed() {
                self.profile.cancel_edit().await;
            }
        } else {
            self.profile.cancel_edit().await;
        }
    }
}
