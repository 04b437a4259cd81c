//! Vertica application state
//!
//! Route-driven state machine for the TUI. Key handling mutates state and
//! queues [`Effect`]s; the event loop performs them and feeds the results
//! back through [`App::apply`].

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::TmdbClient;
use crate::models::Route;
use crate::pages::{self, HomePage, HomeSection, ShowOutcome, ShowPage};
use crate::search::SearchBox;
use crate::ui::{CarouselView, EpisodeViewer, HeroSlider};

pub const HOME_LOAD_FAILED: &str = "Failed to load shows";

// =============================================================================
// App State Enum
// =============================================================================

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Hero slider and the three carousels
    #[default]
    Home,
    /// Show header and episode viewer
    Show,
    /// Unknown route or show
    NotFound,
}

// =============================================================================
// Input Mode
// =============================================================================

/// Which keymap applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Page navigation
    #[default]
    Normal,
    /// Typing into the search box
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Progress of a page load
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Nothing in flight
    #[default]
    Idle,
    /// In flight, with an optional caption
    Loading(Option<String>),
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Header Navigation
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Section(HomeSection),
}

impl NavItem {
    pub const ALL: [NavItem; 4] = [
        NavItem::Home,
        NavItem::Section(HomeSection::Trending),
        NavItem::Section(HomeSection::TopRated),
        NavItem::Section(HomeSection::AiringToday),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Home => "Home",
            NavItem::Section(section) => section.nav_label(),
        }
    }
}

// =============================================================================
// Home Screen
// =============================================================================

/// Which part of the home screen receives arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeFocus {
    #[default]
    Hero,
    Section(HomeSection),
}

impl HomeFocus {
    pub fn is_hero(&self) -> bool {
        matches!(self, HomeFocus::Hero)
    }

    pub fn section(&self) -> Option<HomeSection> {
        match self {
            HomeFocus::Hero => None,
            HomeFocus::Section(section) => Some(*section),
        }
    }

    pub fn next(self) -> Self {
        match self {
            HomeFocus::Hero => HomeFocus::Section(HomeSection::Trending),
            HomeFocus::Section(HomeSection::Trending) => HomeFocus::Section(HomeSection::TopRated),
            HomeFocus::Section(HomeSection::TopRated) => {
                HomeFocus::Section(HomeSection::AiringToday)
            }
            HomeFocus::Section(HomeSection::AiringToday) => HomeFocus::Hero,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            HomeFocus::Hero => HomeFocus::Section(HomeSection::AiringToday),
            HomeFocus::Section(HomeSection::Trending) => HomeFocus::Hero,
            HomeFocus::Section(HomeSection::TopRated) => HomeFocus::Section(HomeSection::Trending),
            HomeFocus::Section(HomeSection::AiringToday) => {
                HomeFocus::Section(HomeSection::TopRated)
            }
        }
    }
}

#[derive(Debug)]
pub struct HomeState {
    pub page: Option<HomePage>,
    pub loading: LoadingState,
    pub hero: HeroSlider,
    /// One carousel per [`HomeSection::ALL`] entry
    pub carousels: [CarouselView; 3],
    pub focus: HomeFocus,
}

impl Default for HomeState {
    fn default() -> Self {
        let carousels = HomeSection::ALL.map(|s| CarouselView::new(s.title(), s.anchor()));
        Self {
            page: None,
            loading: LoadingState::Idle,
            hero: HeroSlider::new(Vec::new(), Instant::now()),
            carousels,
            focus: HomeFocus::Hero,
        }
    }
}

impl HomeState {
    pub fn set_page(&mut self, page: HomePage, now: Instant) {
        self.hero.set_shows(page.hero.clone(), now);
        for section in HomeSection::ALL {
            self.carousels[section.index()].set_items(page.section(section).to_vec());
        }
        self.page = Some(page);
        self.loading = LoadingState::Idle;
        self.set_focus(self.focus);
    }

    pub fn set_focus(&mut self, focus: HomeFocus) {
        self.focus = focus;
        for section in HomeSection::ALL {
            self.carousels[section.index()].focused = focus == HomeFocus::Section(section);
        }
    }

    pub fn carousel(&self, section: HomeSection) -> &CarouselView {
        &self.carousels[section.index()]
    }

    pub fn carousel_mut(&mut self, section: HomeSection) -> &mut CarouselView {
        &mut self.carousels[section.index()]
    }

    /// Show under the cursor in the focused area
    pub fn selected_show(&self) -> Option<u64> {
        match self.focus {
            HomeFocus::Hero => self.hero.current_show().map(|s| s.id),
            HomeFocus::Section(section) => self.carousel(section).current().map(|s| s.id),
        }
    }
}

// =============================================================================
// Show Screen
// =============================================================================

#[derive(Debug, Default)]
pub struct ShowState {
    pub id: Option<u64>,
    pub page: Option<ShowPage>,
    pub loading: LoadingState,
    pub episodes: EpisodeViewer,
    /// Header scroll offset
    pub scroll: u16,
}

impl ShowState {
    fn start(&mut self, id: u64) {
        *self = Self {
            id: Some(id),
            loading: LoadingState::Loading(None),
            ..Self::default()
        };
    }

    pub fn set_page(&mut self, page: ShowPage) {
        self.episodes = EpisodeViewer::new(page.season.clone());
        self.page = Some(page);
        self.loading = LoadingState::Idle;
        self.scroll = 0;
    }
}

// =============================================================================
// Effects
// =============================================================================

/// Work the event loop performs on the app's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    LoadHome,
    LoadShow(u64),
}

/// Finished page loads, fed back through [`App::apply`]
#[derive(Debug)]
pub enum PageMsg {
    Home(Result<HomePage, String>),
    Show { id: u64, outcome: ShowOutcome },
}

/// Run an effect on the runtime, reporting through `tx`
pub fn perform(
    effect: Effect,
    client: Arc<TmdbClient>,
    tx: UnboundedSender<PageMsg>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let msg = match effect {
            Effect::LoadHome => PageMsg::Home(pages::load_home(&client).await.map_err(|e| {
                warn!(error = %e, "home page failed");
                e.to_string()
            })),
            Effect::LoadShow(id) => PageMsg::Show {
                id,
                outcome: pages::load_show_by_id(&client, id).await,
            },
        };
        let _ = tx.send(msg);
    })
}

// =============================================================================
// Main Application State
// =============================================================================

#[derive(Debug)]
pub struct App {
    /// Current screen
    pub state: AppState,
    /// Current route
    pub route: Route,
    /// Routes to return to on Esc
    pub nav_stack: Vec<Route>,
    /// Cleared to leave the event loop
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Global error message
    pub error: Option<String>,
    /// Selected entry while the header menu is open
    pub menu: Option<usize>,

    pub home: HomeState,
    pub show: ShowState,
    pub search: SearchBox,

    effects: Vec<Effect>,
}

impl App {
    /// Create the app and enter the start route
    pub fn new(search: SearchBox, start: Route) -> Self {
        let mut app = Self {
            state: AppState::Home,
            route: Route::Home,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,
            menu: None,
            home: HomeState::default(),
            show: ShowState::default(),
            search,
            effects: Vec::new(),
        };
        app.enter(start);
        app
    }

    /// Navigate to a route, pushing the current one to the stack
    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            self.nav_stack.push(self.route);
            self.enter(route);
        }
        self.input_mode = InputMode::Normal;
        self.search.state.close();
        self.menu = None;
    }

    fn enter(&mut self, route: Route) {
        debug!(%route, "entering route");
        self.route = route;
        match route {
            Route::Home => {
                self.state = AppState::Home;
                if self.home.page.is_none() && !self.home.loading.is_loading() {
                    self.home.loading = LoadingState::Loading(None);
                    self.effects.push(Effect::LoadHome);
                }
            }
            Route::Show(id) => {
                self.state = AppState::Show;
                if self.show.id != Some(id) || self.show.page.is_none() {
                    self.show.start(id);
                    self.effects.push(Effect::LoadShow(id));
                }
            }
            Route::NotFound => self.state = AppState::NotFound,
        }
    }

    /// Go back: leave editing, then close the menu, then pop the stack
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            self.search.state.close();
            return true;
        }

        if self.menu.is_some() {
            self.menu = None;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            self.enter(prev);
            true
        } else {
            false
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
        self.search.state.open = true;
        self.menu = None;
    }

    pub fn toggle_menu(&mut self) {
        self.menu = match self.menu {
            Some(_) => None,
            None => Some(0),
        };
    }

    /// Header navigation: go home, optionally focusing a section
    pub fn activate_nav(&mut self, item: NavItem) {
        self.navigate(Route::Home);
        match item {
            NavItem::Home => self.home.set_focus(HomeFocus::Hero),
            NavItem::Section(section) => self.home.set_focus(HomeFocus::Section(section)),
        }
    }

    /// Effects queued since the last call
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Apply a finished page load
    pub fn apply(&mut self, msg: PageMsg) {
        match msg {
            PageMsg::Home(Ok(page)) => self.home.set_page(page, Instant::now()),
            PageMsg::Home(Err(_)) => {
                self.home.loading = LoadingState::Error(HOME_LOAD_FAILED.to_string());
            }
            PageMsg::Show { id, outcome } => {
                if self.route != Route::Show(id) {
                    debug!(id, "dropping stale show result");
                    return;
                }
                match outcome {
                    ShowOutcome::Found(page) => self.show.set_page(*page),
                    ShowOutcome::NotFound => {
                        self.show.loading = LoadingState::Idle;
                        self.state = AppState::NotFound;
                    }
                }
            }
        }
    }

    /// Periodic update: search events and hero autoplay
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.search.drain();
        if self.state == AppState::Home {
            changed |= self.home.hero.tick(now);
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Dispatch a key press; false when nothing reacted to it
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Any key dismisses the error popup
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else if self.menu.is_some() {
            self.handle_menu_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.back(),
            KeyCode::Enter => {
                if let Some(route) = self.search.submit() {
                    self.navigate(route);
                }
                true
            }
            KeyCode::Up => {
                self.search.state.highlight_prev();
                true
            }
            KeyCode::Down | KeyCode::Tab => {
                self.search.state.highlight_next();
                true
            }
            KeyCode::Char('u') if ctrl => {
                self.search.clear();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.search.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.search.backspace();
                true
            }
            KeyCode::Delete => {
                self.search.delete();
                true
            }
            KeyCode::Left => {
                self.search.state.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.state.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.state.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.state.cursor_end();
                true
            }
            _ => false,
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> bool {
        let Some(selected) = self.menu else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu = Some(selected.saturating_sub(1));
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu = Some((selected + 1).min(NavItem::ALL.len() - 1));
                true
            }
            KeyCode::Enter => {
                if let Some(item) = NavItem::ALL.get(selected).copied() {
                    self.activate_nav(item);
                }
                true
            }
            KeyCode::Char('m') | KeyCode::Esc => self.back(),
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            _ => false,
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                return true;
            }
            KeyCode::Char('m') => {
                self.toggle_menu();
                return true;
            }
            KeyCode::Char(c @ '1'..='9') if key.modifiers.contains(KeyModifiers::ALT) => {
                return self.jump_to(c as usize - '1' as usize);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                if let Some(item) = NavItem::ALL.get(index).copied() {
                    self.activate_nav(item);
                }
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            _ => {}
        }

        match self.state {
            AppState::Home => self.handle_home_key(key),
            AppState::Show => self.handle_show_key(key),
            AppState::NotFound => self.handle_not_found_key(key),
        }
    }

    /// Alt+digit picks a hero slide or an episode by position
    fn jump_to(&mut self, index: usize) -> bool {
        match self.state {
            AppState::Home if self.home.focus.is_hero() => {
                self.home.hero.go_to(index, Instant::now());
                true
            }
            AppState::Show => {
                self.show.episodes.jump(index);
                true
            }
            _ => false,
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        let now = Instant::now();
        let focus = self.home.focus;
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                self.home.set_focus(focus.next());
                true
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
                self.home.set_focus(focus.prev());
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                match focus {
                    HomeFocus::Hero => self.home.hero.prev(now),
                    HomeFocus::Section(section) => self.home.carousel_mut(section).left(),
                }
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                match focus {
                    HomeFocus::Hero => self.home.hero.next(now),
                    HomeFocus::Section(section) => self.home.carousel_mut(section).right(),
                }
                true
            }
            KeyCode::Char('[') => {
                if let HomeFocus::Section(section) = focus {
                    self.home.carousel_mut(section).scroll_left();
                }
                true
            }
            KeyCode::Char(']') => {
                if let HomeFocus::Section(section) = focus {
                    self.home.carousel_mut(section).scroll_right();
                }
                true
            }
            KeyCode::Enter => {
                if let Some(id) = self.home.selected_show() {
                    self.navigate(Route::Show(id));
                }
                true
            }
            KeyCode::Char('r') if self.home.loading.is_error() => {
                self.home.loading = LoadingState::Idle;
                self.enter(Route::Home);
                true
            }
            _ => false,
        }
    }

    fn handle_show_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                self.show.episodes.next();
                true
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
                self.show.episodes.prev();
                true
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.show.episodes.first();
                true
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.show.episodes.last();
                true
            }
            KeyCode::PageDown => {
                self.show.scroll = self.show.scroll.saturating_add(3);
                true
            }
            KeyCode::PageUp => {
                self.show.scroll = self.show.scroll.saturating_sub(3);
                true
            }
            _ => false,
        }
    }

    fn handle_not_found_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                self.navigate(Route::Home);
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
