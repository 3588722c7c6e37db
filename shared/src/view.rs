//! View-model for the lesson sign-up board.
//!
//! Pages fetch the lesson list, my lessons and my sign-up positions, then ask
//! [`LessonBoard`] what each card should show. Capacity and waitlist order are
//! decided by the backend; this only interprets the numbers it returns.

use std::collections::{HashMap, HashSet};

use crate::models::{Lesson, SignupPosition};

pub const CHILDREN_COLOR: &str = "#a44d3a";
pub const ADULT_COLOR: &str = "#4379a6";
pub const POSTER_IMAGE: &str = "/static/img/lessons/lesson-poster.png";

/// What the sign-up control of a lesson card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpAction {
    /// Logged out: no control at all.
    Hidden,
    SignUp,
    /// Full, but signing up puts the user on the waitlist.
    JoinWaitlist,
    Enrolled,
    /// Signed up beyond capacity; `rank` is 1 for the first person waiting.
    Waitlisted { rank: u32 },
}

impl SignUpAction {
    pub fn label(&self) -> String {
        match self {
            SignUpAction::Hidden => String::new(),
            SignUpAction::SignUp => "申し込みをする".to_string(),
            SignUpAction::JoinWaitlist => "キャンセル待ちで申し込む".to_string(),
            SignUpAction::Enrolled => "申し込み済み".to_string(),
            SignUpAction::Waitlisted { rank } => format!("キャンセル待ち {}番目", rank),
        }
    }

    pub fn can_sign_up(&self) -> bool {
        matches!(self, SignUpAction::SignUp | SignUpAction::JoinWaitlist)
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self, SignUpAction::Enrolled | SignUpAction::Waitlisted { .. })
    }
}

/// Everything a lesson card renders, precomputed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCard {
    pub id: i64,
    pub number: i32,
    pub title: String,
    pub teacher: String,
    pub teacher_image: String,
    pub day: String,
    pub day_color: Option<&'static str>,
    pub number_color: &'static str,
    pub time: String,
    pub place: Option<String>,
    pub fee_label: String,
    pub capacity_label: String,
    pub description: String,
    pub action: SignUpAction,
}

/// Data behind the lesson list pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonBoard {
    pub lessons: Vec<Lesson>,
    pub my_lessons: Vec<Lesson>,
    pub positions: Vec<SignupPosition>,
    pub logged_in: bool,
}

impl LessonBoard {
    pub fn logged_out(lessons: Vec<Lesson>) -> Self {
        Self {
            lessons,
            ..Self::default()
        }
    }

    pub fn is_enrolled(&self, lesson_id: i64) -> bool {
        self.my_lessons.iter().any(|l| l.id == lesson_id)
    }

    /// Sign-up position for a lesson, `None` when unknown or not signed up.
    pub fn position(&self, lesson_id: i64) -> Option<u32> {
        self.positions
            .iter()
            .find(|p| p.lesson_id == lesson_id)
            .map(|p| p.user_position)
            .filter(|p| *p > 0)
    }

    pub fn action(&self, lesson: &Lesson) -> SignUpAction {
        if !self.logged_in {
            return SignUpAction::Hidden;
        }
        if self.is_enrolled(lesson.id) {
            return enrolled_action(lesson, self.position(lesson.id));
        }
        match lesson.seats_left() {
            Some(left) if left <= 0 => SignUpAction::JoinWaitlist,
            _ => SignUpAction::SignUp,
        }
    }

    /// Cards for the full lesson list, in server order.
    pub fn cards(&self) -> Vec<LessonCard> {
        self.lessons
            .iter()
            .map(|lesson| card(lesson, self.action(lesson)))
            .collect()
    }

    /// Cards for the lessons the user signed up for.
    pub fn my_cards(&self) -> Vec<LessonCard> {
        let positions: HashMap<i64, u32> = self
            .positions
            .iter()
            .filter(|p| p.user_position > 0)
            .map(|p| (p.lesson_id, p.user_position))
            .collect();
        let mut seen = HashSet::new();
        self.my_lessons
            .iter()
            .filter(|lesson| seen.insert(lesson.id))
            .map(|lesson| card(lesson, enrolled_action(lesson, positions.get(&lesson.id).copied())))
            .collect()
    }

    pub fn waitlisted_count(&self) -> usize {
        self.my_cards()
            .iter()
            .filter(|c| matches!(c.action, SignUpAction::Waitlisted { .. }))
            .count()
    }
}

fn enrolled_action(lesson: &Lesson, position: Option<u32>) -> SignUpAction {
    match (lesson.capacity, position) {
        (Some(capacity), Some(position)) if capacity >= 0 && position > capacity as u32 => {
            SignUpAction::Waitlisted {
                rank: position - capacity as u32,
            }
        }
        _ => SignUpAction::Enrolled,
    }
}

fn card(lesson: &Lesson, action: SignUpAction) -> LessonCard {
    let day = lesson.day.clone().unwrap_or_default();
    LessonCard {
        id: lesson.id,
        number: lesson.number,
        title: lesson.title.clone(),
        teacher: lesson.teacher.clone(),
        teacher_image: teacher_image(&lesson.teacher),
        day_color: day_color(&day),
        day,
        number_color: number_color(lesson.number),
        time: lesson.time.clone().unwrap_or_default(),
        place: lesson.place.clone(),
        fee_label: fee_label(lesson),
        capacity_label: capacity_label(lesson),
        description: lesson.description.clone().unwrap_or_default(),
        action,
    }
}

pub fn number_color(number: i32) -> &'static str {
    if number <= 1 {
        CHILDREN_COLOR
    } else {
        ADULT_COLOR
    }
}

pub fn day_color(day: &str) -> Option<&'static str> {
    match day {
        "日" => Some("red"),
        "月" => Some("gray"),
        "火" => Some("orange"),
        "水" => Some("#4193f6"),
        "木" => Some("#3f8d57"),
        "金" => Some("#f19937"),
        "土" => Some("blue"),
        _ => None,
    }
}

pub fn capacity_label(lesson: &Lesson) -> String {
    match (lesson.capacity, lesson.seats_left()) {
        (Some(capacity), Some(left)) => format!("{} / {} 名", left, capacity),
        _ => "なし".to_string(),
    }
}

pub fn fee_label(lesson: &Lesson) -> String {
    match lesson.price {
        Some(price) => format!("{}円（全{}回分）", format_yen(price), lesson.sessions()),
        None => "-".to_string(),
    }
}

/// `8000` -> `8,000`
pub fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn teacher_image(teacher: &str) -> String {
    format!("/static/img/lessons/{}.png", teacher)
}

/// Index before which the poster is inserted: right after the first card.
pub fn poster_slot(card_count: usize) -> Option<usize> {
    (card_count > 0).then_some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: i64, number: i32, capacity: Option<i32>, capacity_left: Option<i32>) -> Lesson {
        Lesson {
            id,
            year: Some(2025),
            season: Some(1),
            number,
            title: format!("Lesson {}", id),
            teacher: "佐藤".to_string(),
            day: Some("水".to_string()),
            time: Some("19:00".to_string()),
            place: None,
            price: Some(12000),
            description: None,
            capacity,
            capacity_left,
            lessons: None,
        }
    }

    fn position(lesson_id: i64, user_position: u32) -> SignupPosition {
        SignupPosition {
            lesson_id,
            user_position,
        }
    }

    #[test]
    fn test_logged_out_hides_controls() {
        let board = LessonBoard::logged_out(vec![lesson(1, 2, Some(10), Some(3))]);
        assert_eq!(board.cards()[0].action, SignUpAction::Hidden);
    }

    #[test]
    fn test_open_full_and_enrolled() {
        let open = lesson(1, 2, Some(10), Some(3));
        let full = lesson(2, 3, Some(10), Some(0));
        let mine = lesson(3, 4, Some(10), Some(0));
        let board = LessonBoard {
            lessons: vec![open, full, mine.clone()],
            my_lessons: vec![mine],
            positions: vec![position(3, 4)],
            logged_in: true,
        };

        let actions: Vec<_> = board.cards().iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            vec![
                SignUpAction::SignUp,
                SignUpAction::JoinWaitlist,
                SignUpAction::Enrolled
            ]
        );
    }

    #[test]
    fn test_waitlist_rank_beyond_capacity() {
        let full = lesson(7, 5, Some(12), Some(-2));
        let board = LessonBoard {
            lessons: vec![full.clone()],
            my_lessons: vec![full],
            positions: vec![position(7, 14)],
            logged_in: true,
        };
        assert_eq!(board.cards()[0].action, SignUpAction::Waitlisted { rank: 2 });
        assert_eq!(board.waitlisted_count(), 1);
        assert_eq!(board.cards()[0].action.label(), "キャンセル待ち 2番目");
    }

    #[test]
    fn test_position_at_capacity_is_enrolled() {
        let l = lesson(7, 5, Some(12), Some(0));
        let board = LessonBoard {
            lessons: vec![l.clone()],
            my_lessons: vec![l],
            positions: vec![position(7, 12)],
            logged_in: true,
        };
        assert_eq!(board.cards()[0].action, SignUpAction::Enrolled);
    }

    #[test]
    fn test_unlimited_lesson_never_waitlists() {
        let l = lesson(8, 1, None, None);
        let board = LessonBoard {
            lessons: vec![l.clone()],
            my_lessons: vec![l],
            positions: vec![position(8, 99)],
            logged_in: true,
        };
        assert_eq!(board.cards()[0].action, SignUpAction::Enrolled);
        assert_eq!(board.cards()[0].capacity_label, "なし");
    }

    #[test]
    fn test_zero_position_means_unknown() {
        let board = LessonBoard {
            positions: vec![position(1, 0)],
            ..Default::default()
        };
        assert_eq!(board.position(1), None);
    }

    #[test]
    fn test_my_cards_skip_duplicates() {
        let l = lesson(4, 2, Some(5), Some(0));
        let board = LessonBoard {
            lessons: vec![],
            my_lessons: vec![l.clone(), l],
            positions: vec![position(4, 6)],
            logged_in: true,
        };
        let cards = board.my_cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].action, SignUpAction::Waitlisted { rank: 1 });
    }

    #[test]
    fn test_capacity_label_falls_back_to_capacity() {
        assert_eq!(capacity_label(&lesson(1, 2, Some(15), None)), "15 / 15 名");
        assert_eq!(capacity_label(&lesson(1, 2, Some(15), Some(4))), "4 / 15 名");
    }

    #[test]
    fn test_fee_label() {
        let mut l = lesson(1, 2, None, None);
        assert_eq!(fee_label(&l), "12,000円（全10回分）");
        l.lessons = Some(8);
        l.price = Some(500);
        assert_eq!(fee_label(&l), "500円（全8回分）");
        l.price = None;
        assert_eq!(fee_label(&l), "-");
    }

    #[test]
    fn test_format_yen() {
        assert_eq!(format_yen(0), "0");
        assert_eq!(format_yen(999), "999");
        assert_eq!(format_yen(1000), "1,000");
        assert_eq!(format_yen(1234567), "1,234,567");
        assert_eq!(format_yen(-25000), "-25,000");
    }

    #[test]
    fn test_colors() {
        assert_eq!(number_color(1), CHILDREN_COLOR);
        assert_eq!(number_color(0), CHILDREN_COLOR);
        assert_eq!(number_color(2), ADULT_COLOR);
        assert_eq!(day_color("木"), Some("#3f8d57"));
        assert_eq!(day_color("日"), Some("red"));
        assert_eq!(day_color("?"), None);
    }

    #[test]
    fn test_poster_slot() {
        assert_eq!(poster_slot(0), None);
        assert_eq!(poster_slot(1), Some(1));
        assert_eq!(poster_slot(9), Some(1));
    }

    #[test]
    fn test_public_board_offers_cancel_for_own_lessons() {
        let mine = lesson(5, 2, Some(10), Some(1));
        let waiting = lesson(6, 2, Some(2), Some(-1));
        let board = LessonBoard {
            lessons: vec![lesson(4, 2, Some(10), Some(9)), mine.clone(), waiting.clone()],
            my_lessons: vec![mine, waiting],
            positions: vec![position(6, 3)],
            logged_in: true,
        };

        let cancellable: Vec<i64> = board
            .cards()
            .iter()
            .filter(|c| c.action.can_cancel())
            .map(|c| c.id)
            .collect();
        assert_eq!(cancellable, vec![5, 6]);
        assert!(!board.cards()[0].action.can_cancel());
    }
}
