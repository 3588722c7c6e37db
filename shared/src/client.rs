//! Typed client for the booking backend.
//!
//! [`BookingClient`] knows the endpoints and the session; the HTTP work is done
//! by a [`Transport`], which is `gloo-net` in the browser and `reqwest` on the
//! command line.

use serde::de::DeserializeOwned;

use crate::api::{
    ApiRequest, Auth, ErrorDetail, Method, RegisterRequest, RequestBody, SignupRequest,
    TodoCreate, TodoUpdate,
};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AccessToken, Lesson, LessonCreate, LessonMembers, LessonUpdate, PeriodRequest,
    SignupPosition, Todo, UserDetails,
};
use crate::session::{Session, TokenStore};
use crate::view::LessonBoard;

/// A request with the bearer token already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

impl HttpRequest {
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response.
///
/// Implementations only fail for transport problems; HTTP error statuses are
/// returned as responses and interpreted by the client.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse>;
}

/// Which lesson list a board is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardScope {
    /// Current season, open once sign-up starts.
    Public,
    /// Current season for admins, available before sign-up opens.
    Admin,
}

impl BoardScope {
    fn request(self) -> ApiRequest {
        match self {
            BoardScope::Public => ApiRequest::public_lessons(),
            BoardScope::Admin => ApiRequest::admin_lessons(),
        }
    }
}

pub struct BookingClient<T, S> {
    transport: T,
    session: Session<S>,
}

impl<T: Transport, S: TokenStore> BookingClient<T, S> {
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            session: Session::new(store),
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute(&self, request: ApiRequest) -> ClientResult<HttpResponse> {
        let bearer = match request.auth {
            Auth::None => None,
            Auth::Optional => self.session.access_token(),
            Auth::Required => match self.session.access_token() {
                Some(token) => Some(token),
                None => {
                    tracing::debug!(path = %request.path, "no access token stored");
                    return Err(ClientError::MissingToken);
                }
            },
        };

        let method = request.method;
        let path = request.path;
        let response = self
            .transport
            .send(HttpRequest {
                method,
                path: path.clone(),
                body: request.body,
                bearer,
            })
            .await
            .map_err(|e| {
                tracing::error!(method = method.as_str(), %path, error = %e, "request failed");
                e
            })?;

        if response.is_success() {
            tracing::debug!(method = method.as_str(), %path, status = response.status, "success");
            return Ok(response);
        }

        let detail = serde_json::from_str::<ErrorDetail>(&response.body)
            .ok()
            .map(|d| d.message());
        tracing::warn!(
            method = method.as_str(),
            %path,
            status = response.status,
            detail = detail.as_deref().unwrap_or(""),
            "request rejected"
        );
        Err(ClientError::Status {
            status: response.status,
            detail,
        })
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<R> {
        let path = request.path.clone();
        let response = self.execute(request).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!(%path, error = %e, "unexpected response body");
            ClientError::from(e)
        })
    }

    /// For endpoints whose body is only an acknowledgement.
    async fn acknowledge(&self, request: ApiRequest) -> ClientResult<serde_json::Value> {
        let response = self.execute(request).await?;
        if response.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Exchanges credentials for a token and stores it with the username.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let token: AccessToken = self.fetch(ApiRequest::login(username, password)).await?;
        self.session.save_login(&token.access_token, username)?;
        tracing::info!(username, "logged in");
        Ok(())
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Username behind the stored token; fails when logged out or expired.
    pub async fn current_username(&self) -> ClientResult<String> {
        self.fetch(ApiRequest::current_username()).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<serde_json::Value> {
        self.acknowledge(ApiRequest::register(request)?).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<serde_json::Value> {
        self.acknowledge(ApiRequest::signup(request)?).await
    }

    /// Creates the account, then logs straight in with the same credentials.
    pub async fn signup_and_login(&self, request: &SignupRequest) -> ClientResult<()> {
        self.signup(request).await?;
        self.login(&request.username, &request.plain_password).await
    }

    pub async fn my_user_details(&self) -> ClientResult<UserDetails> {
        self.fetch(ApiRequest::my_user_details()).await
    }

    // ========================================================================
    // Lessons
    // ========================================================================

    pub async fn lessons(&self, scope: BoardScope) -> ClientResult<Vec<Lesson>> {
        self.fetch(scope.request()).await
    }

    pub async fn my_lessons(&self) -> ClientResult<Vec<Lesson>> {
        self.fetch(ApiRequest::my_lessons()).await
    }

    pub async fn my_positions(&self) -> ClientResult<Vec<SignupPosition>> {
        self.fetch(ApiRequest::my_positions()).await
    }

    pub async fn lesson_position(&self, lesson_id: i64) -> ClientResult<u32> {
        self.fetch(ApiRequest::lesson_position(lesson_id)).await
    }

    /// Fetches everything the sign-up board needs.
    ///
    /// Only the lesson list is required. My lessons and positions degrade to
    /// empty, which renders the board as logged out or without waitlist ranks.
    pub async fn lesson_board(&self, scope: BoardScope) -> ClientResult<LessonBoard> {
        let lessons = self.lessons(scope).await?;

        if !self.session.has_token() {
            return Ok(LessonBoard::logged_out(lessons));
        }

        let my_lessons = match self.my_lessons().await {
            Ok(my_lessons) => my_lessons,
            Err(e) => {
                tracing::warn!(error = %e, "could not load my lessons, showing board logged out");
                return Ok(LessonBoard::logged_out(lessons));
            }
        };

        let positions = self.my_positions().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load sign-up positions");
            Vec::new()
        });

        Ok(LessonBoard {
            lessons,
            my_lessons,
            positions,
            logged_in: true,
        })
    }

    /// Board for "my lessons": only my lessons are required.
    pub async fn my_board(&self) -> ClientResult<LessonBoard> {
        let my_lessons = self.my_lessons().await?;
        let positions = self.my_positions().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load sign-up positions");
            Vec::new()
        });
        Ok(LessonBoard {
            lessons: Vec::new(),
            my_lessons,
            positions,
            logged_in: true,
        })
    }

    /// Signs up for a lesson; returns my lessons afterwards.
    pub async fn sign_up(&self, lesson_id: i64) -> ClientResult<Vec<Lesson>> {
        let lessons = self.fetch(ApiRequest::sign_up(lesson_id)).await?;
        tracing::info!(lesson_id, "signed up to a lesson");
        Ok(lessons)
    }

    pub async fn cancel(&self, lesson_id: i64) -> ClientResult<serde_json::Value> {
        let removed = self.acknowledge(ApiRequest::cancel(lesson_id)).await?;
        tracing::info!(lesson_id, "cancelled a lesson");
        Ok(removed)
    }

    pub async fn create_lesson(&self, lesson: &LessonCreate) -> ClientResult<Lesson> {
        self.fetch(ApiRequest::create_lesson(lesson)?).await
    }

    pub async fn import_lessons(&self, lessons: &[LessonCreate]) -> ClientResult<serde_json::Value> {
        let result = self.acknowledge(ApiRequest::import_lessons(lessons)?).await?;
        tracing::info!(count = lessons.len(), "imported lessons");
        Ok(result)
    }

    pub async fn update_lesson(&self, lesson_id: i64, update: &LessonUpdate) -> ClientResult<Lesson> {
        self.fetch(ApiRequest::update_lesson(lesson_id, update)?).await
    }

    pub async fn delete_lesson(&self, lesson_id: i64) -> ClientResult<serde_json::Value> {
        self.acknowledge(ApiRequest::delete_lesson(lesson_id)).await
    }

    pub async fn lesson_members(&self) -> ClientResult<Vec<LessonMembers>> {
        self.fetch(ApiRequest::lesson_members()).await
    }

    pub async fn remove_member(&self, username: &str, lesson_id: i64) -> ClientResult<serde_json::Value> {
        self.acknowledge(ApiRequest::remove_member(username, lesson_id)).await
    }

    pub async fn update_period(&self, period: &PeriodRequest) -> ClientResult<serde_json::Value> {
        self.acknowledge(ApiRequest::update_period(period)?).await
    }

    // ========================================================================
    // Todos
    // ========================================================================

    pub async fn todos(&self) -> ClientResult<Vec<Todo>> {
        self.fetch(ApiRequest::list_todos()).await
    }

    pub async fn create_todo(&self, todo: &TodoCreate) -> ClientResult<Todo> {
        self.fetch(ApiRequest::create_todo(todo)?).await
    }

    pub async fn update_todo(&self, todo_id: i64, update: &TodoUpdate) -> ClientResult<Todo> {
        self.fetch(ApiRequest::update_todo(todo_id, update)?).await
    }

    pub async fn set_todo_done(&self, todo_id: i64, is_done: bool) -> ClientResult<Todo> {
        self.fetch(ApiRequest::set_todo_done(todo_id, is_done)?).await
    }

    /// Sends the inverse of the todo's current state.
    pub async fn toggle_todo(&self, todo: &Todo) -> ClientResult<Todo> {
        self.set_todo_done(todo.id, !todo.is_done).await
    }

    pub async fn delete_todo(&self, todo_id: i64) -> ClientResult<serde_json::Value> {
        self.acknowledge(ApiRequest::delete_todo(todo_id)).await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::session::{MemoryStore, ACCESS_TOKEN_KEY, USERNAME_KEY};
    use crate::view::SignUpAction;

    /// Replays canned responses keyed by path and records what was sent.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: RefCell<VecDeque<(String, HttpResponse)>>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn respond(self, path: &str, status: u16, body: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back((path.to_string(), HttpResponse::new(status, body)));
            self
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.sent.borrow().clone()
        }
    }

    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
            self.sent.borrow_mut().push(request.clone());
            let (path, response) = self
                .responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ClientError::Network("no scripted response".into()))?;
            assert_eq!(path, request.path, "unexpected request order");
            Ok(response)
        }
    }

    fn logged_in_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "tok").unwrap();
        store.set(USERNAME_KEY, "yamada").unwrap();
        store
    }

    const LESSONS: &str = r#"[
        {"id": 1, "number": 1, "title": "キッズ体操", "teacher": "田中", "capacity": 20, "capacity_left": 5},
        {"id": 2, "number": 2, "title": "ヨガ", "teacher": "佐藤", "capacity": 10, "capacity_left": -1}
    ]"#;

    #[test]
    fn test_login_stores_token_and_username() {
        let transport = ScriptedTransport::default().respond(
            "/token",
            200,
            r#"{"access_token": "jwt-token", "token_type": "bearer"}"#,
        );
        let client = BookingClient::new(transport, MemoryStore::new());

        tokio_test::block_on(client.login("yamada", "secret1")).unwrap();

        assert_eq!(client.session().access_token().as_deref(), Some("jwt-token"));
        assert_eq!(client.session().username().as_deref(), Some("yamada"));
        let sent = client.transport().sent();
        assert_eq!(sent[0].bearer, None);
        assert_eq!(
            sent[0].body,
            RequestBody::Form("username=yamada&password=secret1".into())
        );
    }

    #[test]
    fn test_failed_login_keeps_session_empty() {
        let transport = ScriptedTransport::default().respond(
            "/token",
            401,
            r#"{"detail": "Incorrect username or password"}"#,
        );
        let client = BookingClient::new(transport, MemoryStore::new());

        let err = tokio_test::block_on(client.login("yamada", "wrong")).unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
        assert!(!client.session().has_token());
    }

    #[test]
    fn test_required_auth_without_token_sends_nothing() {
        let client = BookingClient::new(ScriptedTransport::default(), MemoryStore::new());
        let err = tokio_test::block_on(client.my_lessons()).unwrap_err();
        assert!(matches!(err, ClientError::MissingToken));
        assert!(client.transport().sent().is_empty());
    }

    #[test]
    fn test_bearer_token_attached() {
        let transport = ScriptedTransport::default().respond("/my/username", 200, r#""yamada""#);
        let client = BookingClient::new(transport, logged_in_store());

        let name = tokio_test::block_on(client.current_username()).unwrap();
        assert_eq!(name, "yamada");
        assert_eq!(client.transport().sent()[0].bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn test_board_logged_out_fetches_only_lessons() {
        let transport = ScriptedTransport::default().respond("/json/lessons", 200, LESSONS);
        let client = BookingClient::new(transport, MemoryStore::new());

        let board = tokio_test::block_on(client.lesson_board(BoardScope::Public)).unwrap();
        assert!(!board.logged_in);
        assert_eq!(board.lessons.len(), 2);
        assert_eq!(client.transport().sent().len(), 1);
        assert!(board.cards().iter().all(|c| c.action == SignUpAction::Hidden));
    }

    #[test]
    fn test_board_logged_in_with_waitlist() {
        let transport = ScriptedTransport::default()
            .respond("/json/lessons", 200, LESSONS)
            .respond(
                "/json/my/lessons",
                200,
                r#"[{"id": 2, "number": 2, "title": "ヨガ", "teacher": "佐藤", "capacity": 10, "capacity_left": -1}]"#,
            )
            .respond(
                "/json/my/lessons/position",
                200,
                r#"[{"lesson_id": 1, "user_position": 0}, {"lesson_id": 2, "user_position": 11}]"#,
            );
        let client = BookingClient::new(transport, logged_in_store());

        let board = tokio_test::block_on(client.lesson_board(BoardScope::Public)).unwrap();
        assert!(board.logged_in);
        let actions: Vec<_> = board.cards().iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            vec![SignUpAction::SignUp, SignUpAction::Waitlisted { rank: 1 }]
        );
    }

    #[test]
    fn test_board_degrades_when_token_expired() {
        let transport = ScriptedTransport::default()
            .respond("/json/admin/lessons", 200, LESSONS)
            .respond("/json/my/lessons", 401, r#"{"detail": "Could not validate credentials"}"#);
        let client = BookingClient::new(transport, logged_in_store());

        let board = tokio_test::block_on(client.lesson_board(BoardScope::Admin)).unwrap();
        assert!(!board.logged_in);
        assert!(board.my_lessons.is_empty());
    }

    #[test]
    fn test_board_without_positions_still_renders() {
        let transport = ScriptedTransport::default()
            .respond("/json/lessons", 200, LESSONS)
            .respond("/json/my/lessons", 200, "[]")
            .respond("/json/my/lessons/position", 500, "Internal Server Error");
        let client = BookingClient::new(transport, logged_in_store());

        let board = tokio_test::block_on(client.lesson_board(BoardScope::Public)).unwrap();
        assert!(board.logged_in);
        assert!(board.positions.is_empty());
        assert_eq!(board.cards()[1].action, SignUpAction::JoinWaitlist);
    }

    #[test]
    fn test_board_fails_when_signup_not_open() {
        let transport = ScriptedTransport::default().respond(
            "/json/lessons",
            403,
            r#"{"detail": "lesson signup is not allowed yet"}"#,
        );
        let client = BookingClient::new(transport, logged_in_store());

        let err = tokio_test::block_on(client.lesson_board(BoardScope::Public)).unwrap_err();
        match err {
            ClientError::Status { status, detail } => {
                assert_eq!(status, 403);
                assert_eq!(detail.as_deref(), Some("lesson signup is not allowed yet"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_toggle_todo_inverts_state() {
        let transport = ScriptedTransport::default().respond(
            "/todos/is-done/3",
            200,
            r#"{"id": 3, "title": "Book gym", "content": null, "is_done": true}"#,
        );
        let client = BookingClient::new(transport, MemoryStore::new());
        let todo = Todo {
            id: 3,
            title: "Book gym".into(),
            content: None,
            is_done: false,
        };

        let updated = tokio_test::block_on(client.toggle_todo(&todo)).unwrap();
        assert!(updated.is_done);
        let sent = client.transport().sent();
        assert_eq!(sent[0].body.text(), Some(r#"{"is_done":true}"#));
        assert_eq!(sent[0].bearer, None);
    }

    #[test]
    fn test_empty_acknowledgement_is_null() {
        let transport = ScriptedTransport::default().respond("/todos/3", 200, "");
        let client = BookingClient::new(transport, MemoryStore::new());
        let value = tokio_test::block_on(client.delete_todo(3)).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_decode_error_on_wrong_shape() {
        let transport = ScriptedTransport::default().respond("/todos/json", 200, r#"{"todos": []}"#);
        let client = BookingClient::new(transport, MemoryStore::new());
        let err = tokio_test::block_on(client.todos()).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_logout_clears_session() {
        let client = BookingClient::new(ScriptedTransport::default(), logged_in_store());
        client.logout().unwrap();
        assert!(!client.session().has_token());
        assert_eq!(client.session().username(), None);
    }

    #[test]
    fn test_optional_auth_sends_stored_token() {
        let transport = ScriptedTransport::default().respond("/todos/json", 200, "[]");
        let client = BookingClient::new(transport, logged_in_store());

        let todos = tokio_test::block_on(client.todos()).unwrap();
        assert!(todos.is_empty());
        assert_eq!(client.transport().sent()[0].bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn test_sign_up_returns_my_lessons() {
        let transport = ScriptedTransport::default().respond(
            "/lessons/2",
            200,
            r#"[{"id": 2, "number": 2, "title": "ヨガ", "teacher": "佐藤", "capacity": 10, "capacity_left": 0}]"#,
        );
        let client = BookingClient::new(transport, logged_in_store());

        let mine = tokio_test::block_on(client.sign_up(2)).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].seats_left(), Some(0));
        let sent = client.transport().sent();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].body.text(), Some("{}"));
    }

    #[test]
    fn test_cancel_accepts_removed_acknowledgement() {
        let transport = ScriptedTransport::default().respond(
            "/my/lessons/2",
            200,
            r#"{"removed": {"id": 2, "title": "ヨガ"}}"#,
        );
        let client = BookingClient::new(transport, logged_in_store());

        let removed = tokio_test::block_on(client.cancel(2)).unwrap();
        assert_eq!(removed["removed"]["id"], 2);
        assert_eq!(client.transport().sent()[0].method, Method::Delete);
    }

    #[test]
    fn test_lesson_position_is_a_bare_number() {
        let transport = ScriptedTransport::default().respond("/json/my/lessons/2/position", 200, "3");
        let client = BookingClient::new(transport, logged_in_store());

        assert_eq!(tokio_test::block_on(client.lesson_position(2)).unwrap(), 3);
    }

    #[test]
    fn test_my_board_without_positions() {
        let transport = ScriptedTransport::default()
            .respond(
                "/json/my/lessons",
                200,
                r#"[{"id": 2, "number": 2, "title": "ヨガ", "teacher": "佐藤", "capacity": 10, "capacity_left": -1}]"#,
            )
            .respond("/json/my/lessons/position", 500, "Internal Server Error");
        let client = BookingClient::new(transport, logged_in_store());

        let board = tokio_test::block_on(client.my_board()).unwrap();
        assert!(board.logged_in);
        assert!(board.positions.is_empty());
        let cards = board.my_cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].action, SignUpAction::Enrolled);
    }
}
