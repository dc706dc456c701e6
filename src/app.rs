//! Showcase shell: catalog, routing, admin
//!
//! The shell owns which view is showing, the experiment catalog, an optional
//! admin session and the "seconds wasted" counter. It knows nothing about
//! what a toy does.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Colour class given to experiments created from the dashboard
pub const CUSTOM_COLOR: &str = "bg-indigo-100 text-indigo-600";

const ADMIN_USER: &str = "admin";
const ADMIN_PASSWORD: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    #[serde(rename = "AI")]
    Ai,
    Interactive,
    Game,
}

impl Tag {
    pub const ALL: [Tag; 3] = [Tag::Ai, Tag::Interactive, Tag::Game];

    pub fn label(self) -> &'static str {
        match self {
            Tag::Ai => "AI",
            Tag::Interactive => "Interactive",
            Tag::Game => "Game",
        }
    }

    pub fn from_label(label: &str) -> Option<Tag> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// Which screen is showing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    Home,
    Circle,
    Explain,
    Spend,
    Dilemma,
    Craft,
    Quest,
    Custom(String),
    AdminLogin,
    AdminDashboard,
}

impl View {
    /// View for a built-in experiment id
    fn builtin(id: &str) -> Option<View> {
        Some(match id {
            "circle" => View::Circle,
            "explain" => View::Explain,
            "spend" => View::Spend,
            "dilemma" => View::Dilemma,
            "craft" => View::Craft,
            "quest" => View::Quest,
            _ => return None,
        })
    }

    /// Whether time spent here counts as wasted
    pub fn counts_time(&self) -> bool {
        !matches!(self, View::Home | View::AdminLogin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub color: String,
    pub tag: Tag,
}

impl ExperimentMetadata {
    fn builtin(id: &str, title: &str, description: &str, color: &str, tag: Tag) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            cover_image: None,
            color: color.to_string(),
            tag,
        }
    }
}

/// Editable fields of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentDraft {
    pub title: String,
    pub description: String,
    pub tag: Tag,
    pub cover_image: Option<String>,
}

impl ExperimentDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, tag: Tag) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tag,
            cover_image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Invalid credentials (Try: admin / admin)")]
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("no experiment with id {0}")]
    NotFound(String),
    #[error("experiment title cannot be empty")]
    EmptyTitle,
}

/// Proof of a successful admin login. Catalog edits require one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    username: String,
}

impl AdminSession {
    pub fn username(&self) -> &str {
        &self.username
    }
}

pub fn login(username: &str, password: &str) -> Result<AdminSession, LoginError> {
    if username == ADMIN_USER && password == ADMIN_PASSWORD {
        log::info!("Admin logged in");
        Ok(AdminSession {
            username: username.to_string(),
        })
    } else {
        log::warn!("Rejected admin login for {:?}", username);
        Err(LoginError::InvalidCredentials)
    }
}

/// Ordered list of experiments shown on the home grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<ExperimentMetadata>,
    next_custom: u32,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        let entries = vec![
            ExperimentMetadata::builtin(
                "circle",
                "Draw a Perfect Circle",
                "Test your dexterity. Can you draw a mathematically perfect circle with your mouse?",
                "bg-purple-100 text-purple-600",
                Tag::Interactive,
            ),
            ExperimentMetadata::builtin(
                "explain",
                "Explain It Like I'm 5",
                "An AI engine that breaks down the most complex topics into simple, emoji-filled explanations.",
                "bg-blue-100 text-blue-600",
                Tag::Ai,
            ),
            ExperimentMetadata::builtin(
                "spend",
                "Spend the Budget",
                "You have $100 Billion. Can you spend it all on ridiculous items before time runs out?",
                "bg-green-100 text-green-600",
                Tag::Game,
            ),
            ExperimentMetadata::builtin(
                "dilemma",
                "Absurd Dilemmas",
                "Face AI-generated moral dilemmas that get increasingly ridiculous and difficult.",
                "bg-orange-100 text-orange-600",
                Tag::Ai,
            ),
            ExperimentMetadata::builtin(
                "craft",
                "Infinite Craft",
                "Combine elements to create anything. From Water + Fire to... The Internet? Powered by AI.",
                CUSTOM_COLOR,
                Tag::Game,
            ),
            ExperimentMetadata::builtin(
                "quest",
                "Emoji Quest",
                "A pocket-sized RPG. Battle monsters, earn gold, upgrade your gear, and survive as long as you can.",
                "bg-red-100 text-red-600",
                Tag::Game,
            ),
        ];
        Self {
            entries,
            next_custom: 1,
        }
    }

    pub fn entries(&self) -> &[ExperimentMetadata] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ExperimentMetadata> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn validate(draft: &ExperimentDraft) -> Result<(), CatalogError> {
        if draft.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        Ok(())
    }

    /// Append a new experiment and return its id
    pub fn create(
        &mut self,
        _session: &AdminSession,
        draft: ExperimentDraft,
    ) -> Result<String, CatalogError> {
        Self::validate(&draft)?;

        let mut id = format!("custom-game-{}", self.next_custom);
        while self.get(&id).is_some() {
            self.next_custom += 1;
            id = format!("custom-game-{}", self.next_custom);
        }
        self.next_custom += 1;

        log::info!("Created experiment {} ({})", id, draft.title);
        self.entries.push(ExperimentMetadata {
            id: id.clone(),
            title: draft.title,
            description: draft.description,
            cover_image: draft.cover_image,
            color: CUSTOM_COLOR.to_string(),
            tag: draft.tag,
        });
        Ok(id)
    }

    /// Replace the editable fields of an entry. Id and colour are kept.
    pub fn update(
        &mut self,
        _session: &AdminSession,
        id: &str,
        draft: ExperimentDraft,
    ) -> Result<(), CatalogError> {
        Self::validate(&draft)?;
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        entry.title = draft.title;
        entry.description = draft.description;
        entry.tag = draft.tag;
        entry.cover_image = draft.cover_image;
        Ok(())
    }

    pub fn delete(&mut self, _session: &AdminSession, id: &str) -> Result<ExperimentMetadata, CatalogError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        log::info!("Deleted experiment {}", id);
        Ok(self.entries.remove(index))
    }
}

/// Whole seconds spent away from the home screen
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionTimer {
    seconds: u64,
    carry_ms: f64,
}

impl SessionTimer {
    pub fn seconds_wasted(&self) -> u64 {
        self.seconds
    }

    /// Advance by `dt_ms`. Partial seconds carry over only while counting.
    pub fn advance(&mut self, view: &View, dt_ms: f64) {
        if !view.counts_time() {
            self.carry_ms = 0.0;
            return;
        }
        self.carry_ms += dt_ms.max(0.0);
        let whole = (self.carry_ms / 1000.0).floor();
        self.seconds += whole as u64;
        self.carry_ms -= whole * 1000.0;
    }
}

/// `m:ss`
pub fn format_time(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Top-level showcase state
#[derive(Debug, Clone, Default)]
pub struct App {
    view: View,
    pub catalog: Catalog,
    admin: Option<AdminSession>,
    pub timer: SessionTimer,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn admin(&self) -> Option<&AdminSession> {
        self.admin.as_ref()
    }

    /// Open a catalog entry by id. Unknown ids land on Home.
    pub fn open(&mut self, id: &str) -> &View {
        self.view = match View::builtin(id) {
            Some(view) => view,
            None if self.catalog.get(id).is_some() => View::Custom(id.to_string()),
            None => {
                log::warn!("Unknown experiment {}, going home", id);
                View::Home
            }
        };
        &self.view
    }

    pub fn go_home(&mut self) {
        self.view = View::Home;
    }

    /// Admin entry point. Skips the login form if already signed in.
    pub fn open_admin(&mut self) -> &View {
        self.view = if self.admin.is_some() {
            View::AdminDashboard
        } else {
            View::AdminLogin
        };
        &self.view
    }

    pub fn submit_login(&mut self, username: &str, password: &str) -> Result<(), LoginError> {
        let session = login(username, password)?;
        self.admin = Some(session);
        self.view = View::AdminDashboard;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.admin = None;
        self.view = View::Home;
    }

    pub fn tick(&mut self, dt_ms: f64) {
        self.timer.advance(&self.view, dt_ms);
    }

    pub fn wasted_display(&self) -> String {
        format_time(self.timer.seconds_wasted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminSession {
        login("admin", "admin").unwrap()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get("craft").unwrap().title, "Infinite Craft");
        assert_eq!(catalog.get("explain").unwrap().tag, Tag::Ai);
        assert_eq!(catalog.get("circle").unwrap().tag, Tag::Interactive);
    }

    #[test]
    fn test_tag_labels() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_label(tag.label()), Some(tag));
        }
        assert_eq!(Tag::from_label("Puzzle"), None);
    }

    #[test]
    fn test_login() {
        assert!(login("admin", "admin").is_ok());
        let err = login("admin", "hunter2").unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials (Try: admin / admin)");
    }

    #[test]
    fn test_create_update_delete() {
        let session = admin();
        let mut catalog = Catalog::builtin();

        let id = catalog
            .create(&session, ExperimentDraft::new("Snake", "Eat apples", Tag::Game))
            .unwrap();
        assert_eq!(id, "custom-game-1");
        assert_eq!(catalog.entries().last().unwrap().color, CUSTOM_COLOR);

        let mut draft = ExperimentDraft::new("Snake II", "More apples", Tag::Interactive);
        draft.cover_image = Some("data:image/png;base64,AA".into());
        catalog.update(&session, &id, draft).unwrap();
        let entry = catalog.get(&id).unwrap();
        assert_eq!(entry.title, "Snake II");
        assert_eq!(entry.tag, Tag::Interactive);
        assert!(entry.cover_image.is_some());

        let second = catalog
            .create(&session, ExperimentDraft::new("Pong", "", Tag::Game))
            .unwrap();
        assert_eq!(second, "custom-game-2");

        catalog.delete(&session, &id).unwrap();
        assert!(catalog.get(&id).is_none());
        assert_eq!(
            catalog.delete(&session, &id),
            Err(CatalogError::NotFound(id.clone()))
        );
    }

    #[test]
    fn test_empty_title_refused() {
        let session = admin();
        let mut catalog = Catalog::builtin();
        assert_eq!(
            catalog.create(&session, ExperimentDraft::new("   ", "x", Tag::Game)),
            Err(CatalogError::EmptyTitle)
        );
        assert_eq!(
            catalog.update(&session, "circle", ExperimentDraft::new("", "x", Tag::Game)),
            Err(CatalogError::EmptyTitle)
        );
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_routing() {
        let mut app = App::new();
        assert_eq!(app.open("craft"), &View::Craft);
        assert_eq!(app.open("nope"), &View::Home);

        let session = admin();
        let id = app
            .catalog
            .create(&session, ExperimentDraft::new("Snake", "", Tag::Game))
            .unwrap();
        assert_eq!(app.open(&id), &View::Custom(id.clone()));
    }

    #[test]
    fn test_admin_flow() {
        let mut app = App::new();
        assert_eq!(app.open_admin(), &View::AdminLogin);
        assert!(app.submit_login("root", "admin").is_err());
        assert_eq!(app.view(), &View::AdminLogin);
        app.submit_login("admin", "admin").unwrap();
        assert_eq!(app.view(), &View::AdminDashboard);
        assert_eq!(app.admin().unwrap().username(), "admin");

        app.go_home();
        assert_eq!(app.open_admin(), &View::AdminDashboard);
        app.logout();
        assert!(app.admin().is_none());
        assert_eq!(app.view(), &View::Home);
    }

    #[test]
    fn test_timer_only_counts_away_from_home() {
        let mut app = App::new();
        app.tick(5_000.0);
        assert_eq!(app.timer.seconds_wasted(), 0);

        app.open("circle");
        app.tick(600.0);
        app.tick(600.0);
        assert_eq!(app.timer.seconds_wasted(), 1);

        app.open_admin();
        app.tick(3_000.0);
        assert_eq!(app.timer.seconds_wasted(), 1);

        app.submit_login("admin", "admin").unwrap();
        app.tick(74_000.0);
        assert_eq!(app.wasted_display(), "1:15");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(9), "0:09");
        assert_eq!(format_time(61), "1:01");
        assert_eq!(format_time(3600), "60:00");
    }
}
