/*!
 * GUI application for countries-rs - country detail viewer
 *
 * A cross-platform desktop window providing:
 * - Navigation to /country/<name> paths with a back button
 * - A loading / not-found / detail screen for the selected country
 * - A favorite toggle with transient notifications
 *
 * Platform support: Windows, macOS, Linux
 */

use countries_rs::favorites::{FavoriteFlag, Favorites, Toggle};
use countries_rs::notify::Toasts;
use countries_rs::query::QueryCache;
use countries_rs::route::{CountryRoute, History};
use countries_rs::storage::FileStorage;
use countries_rs::view::{self, Action, CountryDetail, Screen};
use countries_rs::{Client, Settings};
use eframe::egui;
use std::time::Instant;

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Countries - countries-rs"),
        ..Default::default()
    };

    let settings = Settings::default();
    let start = std::env::args()
        .nth(1)
        .map(|name| CountryRoute::for_name(&name).path())
        .unwrap_or_else(|| "/".to_string());

    eframe::run_native(
        "Countries",
        options,
        Box::new(move |_cc| Ok(Box::new(CountriesApp::new(settings, start)))),
    )
}

/// Main application state
struct CountriesApp {
    settings: Settings,

    // Input fields
    path_input: String,

    // Navigation and data
    history: History,
    cache: QueryCache<Client>,
    favorites: Favorites<FileStorage>,
    favorite_flag: FavoriteFlag,

    // UI state
    toasts: Toasts,
    error_message: String,
}

impl CountriesApp {
    fn new(settings: Settings, start: String) -> Self {
        let client = Client::from_settings(&settings);
        let favorites = Favorites::new(FileStorage::new(&settings.storage_path));
        Self {
            path_input: start.clone(),
            history: History::new(start),
            cache: QueryCache::new(client),
            favorites,
            favorite_flag: FavoriteFlag::default(),
            toasts: Toasts::default(),
            error_message: String::new(),
            settings,
        }
    }

    fn route(&self) -> Option<CountryRoute> {
        self.history.current().and_then(CountryRoute::parse)
    }

    fn navigate(&mut self) {
        let input = self.path_input.trim();
        // Accept a bare name as a shortcut for /country/<name>.
        let path = if input.starts_with('/') {
            input.to_string()
        } else {
            CountryRoute::for_name(input).path()
        };
        self.error_message.clear();
        self.favorite_flag.invalidate();
        self.history.push(path);
    }

    fn go_back(&mut self) {
        if self.history.back() {
            self.favorite_flag.invalidate();
            self.path_input = self.history.current().unwrap_or("/").to_string();
        }
    }

    fn toggle_favorite(&mut self, name: &str) {
        match self.favorites.toggle(name) {
            Ok(t) => {
                self.favorite_flag.set(name, t == Toggle::Added);
                self.toasts.push(Instant::now(), t.notification(name));
            }
            Err(err) => {
                log::error!("toggle favorite {name:?}: {err}");
                self.error_message = format!("Failed to update favorites: {}", err);
            }
        }
    }

    fn is_favorite(&mut self, name: &str) -> bool {
        self.favorite_flag.get(&self.favorites, name)
    }
}

impl eframe::App for CountriesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let route = self.route();
        let key = route.as_ref().map(|r| r.query_key()).unwrap_or_default();
        let state = self.cache.query(key);
        let screen = route
            .as_ref()
            .map(|_| view::render(&state, &self.settings.locale));

        // Request repaint while fetching (spinner) or while toasts are visible
        if self.cache.has_pending() || !self.toasts.is_empty() {
            ctx.request_repaint();
        }

        let fav = matches!(screen, Some(Screen::Detail(_))) && self.is_favorite(key);
        let mut action = None;

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.history.can_go_back(), egui::Button::new("⬅ Back"))
                    .clicked()
                {
                    action = Some(Action::Back);
                }
                let resp = ui.text_edit_singleline(&mut self.path_input)
                    .on_hover_text("Enter a path like /country/France or just a country name");
                let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (ui.button("Go").clicked() || enter) && !self.path_input.trim().is_empty() {
                    self.navigate();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match &screen {
                None => {
                    ui.label("Enter a country name or a /country/<name> path above.");
                }
                Some(Screen::Loading) => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                }
                Some(Screen::NotFound) => {
                    ui.heading(view::NOT_FOUND_HEADING);
                    ui.add_space(10.0);
                    if ui.button("Go Back").clicked() {
                        action = Some(Action::Back);
                    }
                }
                Some(Screen::Detail(detail)) => {
                    if detail_ui(ui, detail, fav) {
                        action = Some(Action::ToggleFavorite);
                    }
                }
            });

            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
        });

        let now = Instant::now();
        let active = self.toasts.active(now);
        if !active.is_empty() {
            egui::Area::new(egui::Id::new("toasts"))
                .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
                .show(ctx, |ui| {
                    for n in active {
                        egui::Frame::popup(ui.style()).show(ui, |ui| {
                            ui.strong(&n.title);
                            ui.label(&n.description);
                        });
                    }
                });
        }

        match action {
            Some(Action::Back) => self.go_back(),
            Some(Action::ToggleFavorite) => {
                let name = key.to_string();
                self.toggle_favorite(&name);
            }
            None => {}
        }
    }
}

/// Draw the detail layout. Returns `true` when the favorite button was clicked.
fn detail_ui(ui: &mut egui::Ui, d: &CountryDetail, is_favorite: bool) -> bool {
    let label = if is_favorite {
        "♥ Remove from Favorites"
    } else {
        "♡ Add to Favorites"
    };
    let clicked = ui.button(label).clicked();
    ui.add_space(10.0);

    ui.group(|ui| {
        ui.label("Flag");
        ui.hyperlink_to(&d.flag_alt, &d.flag_src);
    });
    ui.add_space(10.0);

    ui.heading(&d.common_name);
    ui.add_space(5.0);
    egui::Grid::new("country_detail")
        .num_columns(2)
        .spacing([24.0, 8.0])
        .show(ui, |ui| {
            for (label, value) in d.rows() {
                ui.strong(label);
                ui.label(value);
                ui.end_row();
            }
        });
    clicked
}
