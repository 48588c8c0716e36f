use libadwaita::prelude::*;
use libadwaita::{Application, ApplicationWindow, HeaderBar, Toast, ToastOverlay};
use gtk4::{Button, CheckButton, CssProvider, DialogFlags, DropDown, Entry, Image, Label, ListBox, MessageDialog, Orientation, ResponseType, ScrolledWindow, Switch};
use gtk4::Box as GtkBox;
use gtk4::glib::WeakRef;
use chrono::Local;
use daily_habits::config::AppConfig;
use daily_habits::presentation::{priority_style, streak_badge, RECURRING_ICON};
use daily_habits::{FilePreferences, Habit, HabitStore, Priority};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type SharedStore = Rc<RefCell<HabitStore<FilePreferences>>>;
type WeakStore = Weak<RefCell<HabitStore<FilePreferences>>>;

pub struct HabitApp {
    window: ApplicationWindow,
    store: SharedStore,
    habit_list: ListBox,
    toast_overlay: ToastOverlay,
}

impl HabitApp {
    pub fn new(app: &Application, config: &AppConfig) -> Result<Self, std::boxed::Box<dyn std::error::Error>> {
        let prefs = FilePreferences::from_config(config)?;
        let store = Rc::new(RefCell::new(HabitStore::open(prefs, &Local::now())));

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Habits")
            .default_width(480)
            .default_height(640)
            .build();

        let header_bar = HeaderBar::new();
        header_bar.set_title_widget(Some(&Label::new(Some("Habits"))));

        let add_button = Button::with_label("Add Habit");
        add_button.set_tooltip_text(Some("Add a new habit"));
        header_bar.pack_end(&add_button);

        let css_provider = CssProvider::new();
        css_provider.load_from_data(include_str!("style.css"));
        gtk4::style_context_add_provider_for_display(
            &gtk4::prelude::WidgetExt::display(&window),
            &css_provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );

        let toast_overlay = ToastOverlay::new();
        let content_box = GtkBox::new(Orientation::Vertical, 0);
        content_box.append(&header_bar);

        let main_box = GtkBox::new(Orientation::Vertical, 10);
        main_box.set_margin_top(10);
        main_box.set_margin_bottom(10);
        main_box.set_margin_start(10);
        main_box.set_margin_end(10);

        let scrolled_window = ScrolledWindow::new();
        scrolled_window.set_vexpand(true);

        let habit_list = ListBox::new();
        habit_list.set_selection_mode(gtk4::SelectionMode::None);
        scrolled_window.set_child(Some(&habit_list));

        main_box.append(&scrolled_window);
        content_box.append(&main_box);
        toast_overlay.set_child(Some(&content_box));
        window.set_content(Some(&toast_overlay));

        let app = Self {
            window,
            store,
            habit_list,
            toast_overlay,
        };

        app.bind_store();
        app.setup_events(add_button);
        Self::refresh_habit_list(
            &app.habit_list,
            app.store.borrow().habits(),
            &Rc::downgrade(&app.store),
            &app.window.downgrade(),
            &app.toast_overlay,
        );

        Ok(app)
    }

    pub fn show(&self) {
        self.window.present();
    }

    /// Redraws the list whenever the store changes.
    fn bind_store(&self) {
        let habit_list = self.habit_list.clone();
        let toast_overlay = self.toast_overlay.clone();
        let store_weak = Rc::downgrade(&self.store);
        let window_weak = self.window.downgrade();

        self.store.borrow_mut().subscribe(move |habits| {
            Self::refresh_habit_list(&habit_list, habits, &store_weak, &window_weak, &toast_overlay);
        });
    }

    fn setup_events(&self, add_button: Button) {
        let window = self.window.clone();
        let store = self.store.clone();
        let toast_overlay = self.toast_overlay.clone();

        add_button.connect_clicked(move |_| {
            Self::show_add_habit_dialog(&window, &store, &toast_overlay);
        });

        // Regaining focus counts as coming back to the foreground.
        let store = self.store.clone();
        self.window.connect_is_active_notify(move |window| {
            if window.is_active() {
                store.borrow_mut().refresh_for_new_day(&Local::now());
            }
        });
    }

    fn show_add_habit_dialog(window: &ApplicationWindow, store: &SharedStore, toast_overlay: &ToastOverlay) {
        let dialog = MessageDialog::new(
            Some(window),
            DialogFlags::MODAL,
            gtk4::MessageType::Question,
            gtk4::ButtonsType::OkCancel,
            "New Habit",
        );

        let content_area = dialog.content_area();
        let form_box = GtkBox::new(Orientation::Vertical, 10);
        form_box.set_margin_start(20);
        form_box.set_margin_end(20);

        let name_entry = Entry::new();
        name_entry.set_placeholder_text(Some("Habit Name"));

        let priority_labels: Vec<&str> = Priority::ALL.iter().map(|p| priority_style(*p).label).collect();
        let priority_dropdown = DropDown::from_strings(&priority_labels);
        let default_index = Priority::ALL
            .iter()
            .position(|p| *p == Priority::default())
            .unwrap_or(0);
        priority_dropdown.set_selected(default_index as u32);

        let priority_row = GtkBox::new(Orientation::Horizontal, 10);
        let priority_label = Label::new(Some("Priority"));
        priority_label.set_hexpand(true);
        priority_label.set_halign(gtk4::Align::Start);
        priority_row.append(&priority_label);
        priority_row.append(&priority_dropdown);

        let recurring_row = GtkBox::new(Orientation::Horizontal, 10);
        let recurring_label = Label::new(Some("Daily Habit"));
        recurring_label.set_hexpand(true);
        recurring_label.set_halign(gtk4::Align::Start);
        let recurring_switch = Switch::new();
        recurring_switch.set_active(true);
        recurring_row.append(&recurring_label);
        recurring_row.append(&recurring_switch);

        form_box.append(&name_entry);
        form_box.append(&priority_row);
        form_box.append(&recurring_row);
        content_area.append(&form_box);

        // Add stays disabled until a name is typed.
        dialog.set_response_sensitive(ResponseType::Ok, false);
        let dialog_clone = dialog.clone();
        name_entry.connect_changed(move |entry| {
            dialog_clone.set_response_sensitive(ResponseType::Ok, !entry.text().is_empty());
        });

        let dialog_clone = dialog.clone();
        name_entry.connect_activate(move |entry| {
            if !entry.text().is_empty() {
                dialog_clone.response(ResponseType::Ok);
            }
        });

        let store = store.clone();
        let toast_overlay = toast_overlay.clone();

        dialog.connect_response(move |dialog, response| {
            if response == ResponseType::Ok {
                let name = name_entry.text().to_string();
                if !name.is_empty() {
                    let priority = Priority::ALL
                        .get(priority_dropdown.selected() as usize)
                        .copied()
                        .unwrap_or_default();
                    let habit = Habit::new(name, priority, recurring_switch.is_active());

                    let message = format!("Added \u{201c}{}\u{201d}", habit.name);
                    store.borrow_mut().add_habit(habit);
                    toast_overlay.add_toast(Toast::new(&message));
                }
            }
            dialog.close();
        });

        dialog.show();
    }

    fn show_delete_confirmation(
        window: &ApplicationWindow,
        habit_id: &str,
        habit_name: &str,
        store: &WeakStore,
        toast_overlay: &ToastOverlay,
    ) {
        let dialog = MessageDialog::new(
            Some(window),
            DialogFlags::MODAL,
            gtk4::MessageType::Warning,
            gtk4::ButtonsType::OkCancel,
            &format!("Delete \u{201c}{}\u{201d}? Its streak will be lost.", habit_name),
        );

        let habit_id = habit_id.to_string();
        let store = store.clone();
        let toast_overlay = toast_overlay.clone();

        dialog.connect_response(move |dialog, response| {
            if response == ResponseType::Ok {
                if let Some(store) = store.upgrade() {
                    let removed = store.borrow_mut().remove_habit(&habit_id);
                    if let Some(habit) = removed {
                        let toast = Toast::new(&format!("Deleted \u{201c}{}\u{201d}", habit.name));
                        toast_overlay.add_toast(toast);
                    }
                }
            }
            dialog.close();
        });

        dialog.show();
    }

    fn refresh_habit_list(
        habit_list: &ListBox,
        habits: &[Habit],
        store: &WeakStore,
        window: &WeakRef<ApplicationWindow>,
        toast_overlay: &ToastOverlay,
    ) {
        while let Some(child) = habit_list.first_child() {
            habit_list.remove(&child);
        }

        if habits.is_empty() {
            let placeholder = Label::new(Some("No habits yet. Use \u{201c}Add Habit\u{201d} to start one."));
            placeholder.add_css_class("dim-label");
            placeholder.set_margin_top(20);
            habit_list.append(&placeholder);
            return;
        }

        let now = Local::now();
        for habit in habits {
            let done = habit.is_completed_today(&now);

            let row = GtkBox::new(Orientation::Horizontal, 10);
            row.add_css_class("habit-row");

            let check_button = CheckButton::new();
            check_button.set_active(done);
            check_button.set_valign(gtk4::Align::Center);
            check_button.set_tooltip_text(Some(if done { "Undo today's completion" } else { "Mark as completed today" }));

            let info_box = GtkBox::new(Orientation::Vertical, 4);
            info_box.set_hexpand(true);

            let title_row = GtkBox::new(Orientation::Horizontal, 10);
            let name_label = Label::new(Some(&habit.name));
            name_label.add_css_class("habit-name");
            name_label.set_hexpand(true);
            name_label.set_halign(gtk4::Align::Start);
            if done {
                name_label.add_css_class("habit-done");
            }

            let streak_label = Label::new(Some(&streak_badge(habit.streak())));
            streak_label.add_css_class("streak-badge");

            title_row.append(&name_label);
            title_row.append(&streak_label);

            let detail_row = GtkBox::new(Orientation::Horizontal, 4);
            let style = priority_style(habit.priority);
            let priority_icon = Image::from_icon_name(style.icon_name);
            priority_icon.add_css_class(style.css_class);
            let priority_label = Label::new(Some(style.label));
            priority_label.add_css_class("dim-label");
            detail_row.append(&priority_icon);
            detail_row.append(&priority_label);

            if habit.is_recurring {
                let recurring_label = Label::new(Some(RECURRING_ICON));
                recurring_label.set_tooltip_text(Some("Daily habit"));
                recurring_label.add_css_class("recurring-indicator");
                recurring_label.set_margin_start(6);
                detail_row.append(&recurring_label);
            }

            info_box.append(&title_row);
            info_box.append(&detail_row);

            let delete_button = Button::with_label("🗑️");
            delete_button.set_tooltip_text(Some("Delete this habit"));
            delete_button.add_css_class("flat");
            delete_button.set_valign(gtk4::Align::Center);

            row.append(&check_button);
            row.append(&info_box);
            row.append(&delete_button);
            habit_list.append(&row);

            let habit_id = habit.id().to_string();
            let store_for_toggle = store.clone();
            check_button.connect_toggled(move |_| {
                if let Some(store) = store_for_toggle.upgrade() {
                    store.borrow_mut().toggle(&habit_id, &Local::now());
                }
            });

            let habit_id = habit.id().to_string();
            let habit_name = habit.name.clone();
            let store_for_delete = store.clone();
            let window_for_delete = window.clone();
            let toast_overlay_clone = toast_overlay.clone();
            delete_button.connect_clicked(move |_| {
                if let Some(window) = window_for_delete.upgrade() {
                    Self::show_delete_confirmation(&window, &habit_id, &habit_name, &store_for_delete, &toast_overlay_clone);
                }
            });
        }
    }
}
