use anyhow::{bail, Context, Result};
use booking_shared::forms::{self, FormFields};
use booking_shared::models::{LessonCreate, LessonMembers, LessonUpdate, Todo, UserDetails};
use booking_shared::period::period_request;
use booking_shared::{BoardScope, BookingClient, LessonCard, SignUpAction, TokenStore, Transport};
use serde_json::Value;
use std::io::BufRead;

use crate::store::FileStore;
use crate::transport::ReqwestTransport;
use crate::{LessonAction, PeriodAction, TodoAction};

pub type Client = BookingClient<ReqwestTransport, FileStore>;

// ============================================================================
// Session
// ============================================================================

pub async fn login(client: &Client, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    let (username, password) = forms::login(
        &FormFields::new()
            .with("username", username)
            .with("password", password),
    )?;

    client
        .login(&username, &password)
        .await
        .context("Login failed")?;
    println!("Logged in as {}", username);
    Ok(())
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn logout(client: &Client) -> Result<()> {
    client.logout()?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(client: &Client) -> Result<()> {
    let username = client
        .current_username()
        .await
        .context("Not logged in")?;
    println!("{}", username);
    Ok(())
}

pub async fn me(client: &Client) -> Result<()> {
    let details = client.my_user_details().await?;
    print!("{}", format_user_details(&details));
    Ok(())
}

// ============================================================================
// Lessons
// ============================================================================

pub async fn handle_lessons<T: Transport, S: TokenStore>(
    client: &BookingClient<T, S>,
    action: LessonAction,
) -> Result<()> {
    match action {
        LessonAction::List { admin } => {
            let scope = if admin {
                BoardScope::Admin
            } else {
                BoardScope::Public
            };
            let board = client
                .lesson_board(scope)
                .await
                .context("Lessons are not open for sign-up yet")?;
            let cards = board.cards();
            if cards.is_empty() {
                println!("No lessons found.");
            }
            for card in &cards {
                println!("{}", format_card(card));
            }
        }
        LessonAction::Mine => {
            let board = client.my_board().await?;
            let cards = board.my_cards();
            if cards.is_empty() {
                println!("You have not signed up for any lesson.");
            }
            for card in &cards {
                println!("{}", format_card(card));
            }
            let waitlisted = board.waitlisted_count();
            if waitlisted > 0 {
                println!("Waitlisted for {} lesson(s).", waitlisted);
            }
        }
        LessonAction::Signup { id } => {
            let mine = client.sign_up(id).await?;
            println!("Signed up for lesson {}. You now have {} lesson(s).", id, mine.len());
            // The sign-up is already recorded at this point.
            match client.lesson_position(id).await {
                Ok(position) => println!("Your position: {}", position),
                Err(e) => tracing::warn!(lesson_id = id, "Failed to fetch sign-up position: {}", e),
            }
        }
        LessonAction::Cancel { id } => {
            client.cancel(id).await?;
            println!("Cancelled lesson {}", id);
        }
        LessonAction::Position { id } => {
            let position = client.lesson_position(id).await?;
            if position == 0 {
                println!("Not signed up for lesson {}", id);
            } else {
                println!("Position {} for lesson {}", position, id);
            }
        }
        LessonAction::Create {
            year,
            season,
            number,
            title,
            teacher,
            day,
            time,
            price,
            description,
            capacity,
            lessons,
        } => {
            let fields = FormFields::new()
                .with("year", year.to_string())
                .with("season", season.to_string())
                .with("number", number.to_string())
                .with("title", title)
                .with("teacher", teacher)
                .with("day", day.unwrap_or_default())
                .with("time", time.unwrap_or_default())
                .with("price", price.unwrap_or_default())
                .with("description", description.unwrap_or_default())
                .with("capacity", capacity.map(|c| c.to_string()).unwrap_or_default())
                .with("lessons", lessons.map(|l| l.to_string()).unwrap_or_default());
            let lesson = client.create_lesson(&forms::lesson_create(&fields)?).await?;
            println!("Created lesson: [{}] {} {}", lesson.id, lesson.number, lesson.title);
        }
        LessonAction::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let lessons = parse_lesson_import(&content)?;
            client.import_lessons(&lessons).await?;
            println!("Imported {} lesson(s)", lessons.len());
        }
        LessonAction::Update {
            id,
            number,
            title,
            teacher,
            day,
            time,
            price,
            description,
            capacity,
            lessons,
        } => {
            let update = LessonUpdate {
                number,
                title,
                teacher,
                day,
                time,
                price,
                description,
                capacity,
                lessons,
            };
            if update.is_empty() {
                bail!("Nothing to update; pass at least one field");
            }
            let lesson = client.update_lesson(id, &update).await?;
            println!("Updated lesson: [{}] {} {}", lesson.id, lesson.number, lesson.title);
        }
        LessonAction::Delete { id } => {
            client.delete_lesson(id).await?;
            println!("Deleted lesson {}", id);
        }
        LessonAction::Members => {
            let members = client.lesson_members().await?;
            for lesson in &members {
                print!("{}", format_members(lesson));
            }
        }
        LessonAction::RemoveMember { username, lesson_id } => {
            let result = client.remove_member(&username, lesson_id).await?;
            println!("{}", acknowledgement(&result).unwrap_or_else(|| "Removed.".to_string()));
        }
    }

    Ok(())
}

/// Accepts a JSON array of lessons, or a single lesson object.
fn parse_lesson_import(content: &str) -> Result<Vec<LessonCreate>> {
    let value: Value = serde_json::from_str(content).context("Failed to parse lesson JSON")?;
    let lessons = if value.is_array() {
        serde_json::from_value::<Vec<LessonCreate>>(value)
    } else {
        serde_json::from_value::<LessonCreate>(value).map(|lesson| vec![lesson])
    }
    .context("Lesson JSON does not match the expected fields")?;
    Ok(lessons)
}

pub async fn handle_period(client: &Client, action: PeriodAction) -> Result<()> {
    match action {
        PeriodAction::Set {
            year,
            season,
            start,
            end,
        } => {
            let period = period_request(
                &FormFields::new()
                    .with("year", year.to_string())
                    .with("season", season.to_string())
                    .with("start_time", start)
                    .with("end_time", end),
            )?;
            client.update_period(&period).await?;
            println!("期間情報が更新されました。");
        }
    }
    Ok(())
}

// ============================================================================
// Todos
// ============================================================================

pub async fn handle_todos(client: &Client, action: TodoAction) -> Result<()> {
    match action {
        TodoAction::List => {
            let todos = client.todos().await?;
            if todos.is_empty() {
                println!("No todos found.");
            }
            for todo in &todos {
                println!("{}", format_todo(todo));
            }
        }
        TodoAction::Create { title, content } => {
            let todo = forms::todo_create(
                &FormFields::new()
                    .with("title", title)
                    .with("content", content.unwrap_or_default()),
            )?;
            let todo = client.create_todo(&todo).await?;
            println!("Created todo: [{}] {}", todo.id, todo.title);
        }
        TodoAction::Edit { id, title, content } => {
            let todo = client
                .update_todo(id, &forms::todo_edit(&title, &content))
                .await?;
            println!("Updated todo: [{}] {}", todo.id, todo.title);
        }
        TodoAction::Toggle { id } => {
            let todos = client.todos().await?;
            let Some(todo) = todos.iter().find(|t| t.id == id) else {
                bail!("No todo with id {}", id);
            };
            let todo = client.toggle_todo(todo).await?;
            println!("{}", format_todo(&todo));
        }
        TodoAction::Delete { id } => {
            client.delete_todo(id).await?;
            println!("Deleted todo: {}", id);
        }
    }
    Ok(())
}

// ============================================================================
// Formatting
// ============================================================================

fn format_card(card: &LessonCard) -> String {
    let mut line = format!(
        "[{}] {:>2} {} ({}) {} {}  {}  定員 {}",
        card.id,
        card.number,
        card.title,
        card.teacher,
        card.day,
        card.time,
        card.fee_label,
        card.capacity_label
    );
    if card.action != SignUpAction::Hidden {
        line.push_str("  ");
        line.push_str(&card.action.label());
    }
    line
}

fn format_todo(todo: &Todo) -> String {
    let status = if todo.is_done { "✓" } else { "○" };
    match todo.content.as_deref().filter(|c| !c.is_empty()) {
        Some(content) => format!("{} [{}] {}\n    {}", status, todo.id, todo.title, content),
        None => format!("{} [{}] {}", status, todo.id, todo.title),
    }
}

fn format_user_details(details: &UserDetails) -> String {
    let rows = [
        ("お名前", details.full_name()),
        ("ふりがな", details.full_furigana()),
        ("電話番号", details.tel.clone()),
        ("〒郵便番号", details.postal_code.clone()),
        ("住所", details.address.clone()),
        ("メールアドレス", details.email.clone().unwrap_or_default()),
        ("ユーザー名", details.username.clone()),
    ];
    rows.iter()
        .map(|(label, value)| format!("{}: {}\n", label, value))
        .collect()
}

fn format_members(lesson: &LessonMembers) -> String {
    let mut out = format!(
        "{} {} ({} members)\n",
        lesson.lesson_number,
        lesson.lesson_title,
        lesson.users.len()
    );
    for user in &lesson.users {
        out.push_str("    ");
        out.push_str(&member_line(user));
        out.push('\n');
    }
    out
}

/// Adult rows are user details; children's rows carry the parent's contact.
fn member_line(user: &Value) -> String {
    let field = |name: &str| user.get(name).and_then(Value::as_str).unwrap_or("");

    let name = match (field("last_name"), field("first_name")) {
        ("", "") => field("name").to_string(),
        (last, first) => format!("{}\u{3000}{}", last, first),
    };
    let tel = match field("tel") {
        "" => field("parent_tel"),
        tel => tel,
    };

    match field("parent_name") {
        "" => format!("{}  {}", name, tel),
        parent => format!("{}  {}  (保護者: {})", name, tel, parent),
    }
}

/// The single message value of an acknowledgement object.
fn acknowledgement(value: &Value) -> Option<String> {
    match value {
        Value::String(message) => Some(message.clone()),
        Value::Object(map) => map.values().find_map(|v| v.as_str().map(str::to_string)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_shared::models::Lesson;
    use booking_shared::LessonBoard;
    use serde_json::json;

    fn lesson() -> Lesson {
        serde_json::from_value(json!({
            "id": 7,
            "number": 3,
            "title": "ヨガ",
            "teacher": "佐藤",
            "day": "水",
            "time": "19:00",
            "price": 8000,
            "capacity": 10,
            "capacity_left": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_format_card_logged_out_has_no_action() {
        let board = LessonBoard::logged_out(vec![lesson()]);
        let line = format_card(&board.cards()[0]);

        assert_eq!(
            line,
            "[7]  3 ヨガ (佐藤) 水 19:00  8,000円（全10回分）  定員 2 / 10 名"
        );
    }

    #[test]
    fn test_format_card_shows_sign_up_label() {
        let board = LessonBoard {
            lessons: vec![lesson()],
            logged_in: true,
            ..LessonBoard::default()
        };
        let line = format_card(&board.cards()[0]);

        assert!(line.ends_with("申し込みをする"));
    }

    #[test]
    fn test_format_todo() {
        let todo = Todo {
            id: 4,
            title: "Buy balls".to_string(),
            content: Some("size 5".to_string()),
            is_done: true,
        };
        assert_eq!(format_todo(&todo), "✓ [4] Buy balls\n    size 5");

        let todo = Todo {
            content: Some(String::new()),
            is_done: false,
            ..todo
        };
        assert_eq!(format_todo(&todo), "○ [4] Buy balls");
    }

    #[test]
    fn test_member_line_adult_and_child() {
        let adult = json!({"last_name": "山田", "first_name": "花子", "tel": "090-1111-2222"});
        assert_eq!(member_line(&adult), "山田\u{3000}花子  090-1111-2222");

        let child = json!({
            "name": "太郎",
            "parent_name": "山田\u{3000}花子",
            "parent_tel": "090-1111-2222"
        });
        assert_eq!(
            member_line(&child),
            "太郎  090-1111-2222  (保護者: 山田\u{3000}花子)"
        );
    }

    #[test]
    fn test_format_members_header() {
        let lesson = LessonMembers {
            lesson_number: 2,
            lesson_title: "バドミントン".to_string(),
            users: vec![json!({"last_name": "鈴木", "first_name": "一郎", "tel": "0584"})],
        };
        assert_eq!(
            format_members(&lesson),
            "2 バドミントン (1 members)\n    鈴木\u{3000}一郎  0584\n"
        );
    }

    #[test]
    fn test_acknowledgement_message() {
        let value = json!({"removed done": "yamada：山田　花子を「ヨガ」から削除しました。"});
        assert_eq!(
            acknowledgement(&value).as_deref(),
            Some("yamada：山田　花子を「ヨガ」から削除しました。")
        );
        assert_eq!(acknowledgement(&Value::Null), None);
    }

    #[test]
    fn test_parse_lesson_import_accepts_array_or_object() {
        let one = r#"{"year": 2025, "season": 1, "number": 2, "title": "ヨガ", "teacher": "佐藤",
            "day": null, "time": null, "price": 8000, "description": null, "capacity": 10, "lessons": null}"#;
        assert_eq!(parse_lesson_import(one).unwrap().len(), 1);

        let many = format!("[{one}, {one}]");
        assert_eq!(parse_lesson_import(&many).unwrap().len(), 2);

        assert!(parse_lesson_import("[{\"title\": \"x\"}]").is_err());
    }

    #[test]
    fn test_user_details_rows() {
        let details = UserDetails {
            last_name: "山田".to_string(),
            first_name: "花子".to_string(),
            username: "hanako".to_string(),
            ..UserDetails::default()
        };
        let text = format_user_details(&details);

        assert!(text.starts_with("お名前: 山田\u{3000}花子\n"));
        assert!(text.ends_with("ユーザー名: hanako\n"));
    }

    /// Answers each request by its path.
    struct StubTransport {
        routes: Vec<(&'static str, u16, &'static str)>,
        seen: std::cell::RefCell<Vec<String>>,
    }

    impl Transport for StubTransport {
        async fn send(
            &self,
            request: booking_shared::HttpRequest,
        ) -> booking_shared::ClientResult<booking_shared::HttpResponse> {
            self.seen.borrow_mut().push(request.path.clone());
            let (_, status, body) = self
                .routes
                .iter()
                .find(|(path, _, _)| *path == request.path)
                .ok_or_else(|| booking_shared::ClientError::Network(request.path.clone()))?;
            Ok(booking_shared::HttpResponse::new(*status, *body))
        }
    }

    #[test]
    fn test_signup_succeeds_when_position_lookup_fails() {
        let transport = StubTransport {
            routes: vec![
                ("/lessons/3", 200, "[]"),
                ("/json/my/lessons/3/position", 500, r#"{"detail": "boom"}"#),
            ],
            seen: Default::default(),
        };
        let store = booking_shared::session::MemoryStore::new();
        store
            .set(booking_shared::session::ACCESS_TOKEN_KEY, "tok")
            .unwrap();
        let client = BookingClient::new(transport, store);

        let result = tokio_test::block_on(handle_lessons(&client, LessonAction::Signup { id: 3 }));

        assert!(result.is_ok());
        assert_eq!(
            *client.transport().seen.borrow(),
            vec!["/lessons/3".to_string(), "/json/my/lessons/3/position".to_string()]
        );
    }

    #[test]
    fn test_signup_failure_is_still_an_error() {
        let transport = StubTransport {
            routes: vec![("/lessons/3", 400, r#"{"detail": "full"}"#)],
            seen: Default::default(),
        };
        let store = booking_shared::session::MemoryStore::new();
        store
            .set(booking_shared::session::ACCESS_TOKEN_KEY, "tok")
            .unwrap();
        let client = BookingClient::new(transport, store);

        let result = tokio_test::block_on(handle_lessons(&client, LessonAction::Signup { id: 3 }));

        assert!(result.is_err());
        assert_eq!(client.transport().seen.borrow().len(), 1);
    }
}
