use ring_calendar::{
    CalendarDate, CycleConfig, Session, SettingsStore, ViewState, YearMonth, cycle_stamp, layout_month,
    render_text,
};
use tempfile::TempDir;

fn date(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

#[test]
fn test_epoch_day_takes_first_label_of_every_cycle() {
    let config = CycleConfig::defaults();
    let epoch = date("1984-01-01");
    let layout = layout_month(epoch.year_month(), &config, &epoch, None);

    let first = &layout.days[0];
    let labels: Vec<&str> = first.labels.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, ["陰", "石", "風", "日"]);
    assert_eq!(cycle_stamp(&epoch, &config), "陰石風日");
}

#[test]
fn test_february_lengths() {
    let config = CycleConfig::defaults();
    let today = date("2024-06-01");
    let leap: YearMonth = "2024-02".parse().unwrap();
    let common: YearMonth = "2023-02".parse().unwrap();

    assert_eq!(layout_month(leap, &config, &today, None).days.len(), 29);
    assert_eq!(layout_month(common, &config, &today, None).days.len(), 28);
}

#[test]
fn test_partial_import_keeps_defaults_elsewhere() {
    let mut session = Session::new(CycleConfig::defaults(), ViewState::new(date("2024-02-10")));
    let config = session.import_text(r#"{"2":["A","B"],"3":["C"]}"#).unwrap();

    assert_eq!(config.get(2).unwrap().labels(), ["A", "B"]);
    assert_eq!(config.get(3).unwrap().labels(), ["C", "鋏", "紙"]);
    assert_eq!(config.get(5).unwrap().labels(), CycleConfig::defaults().get(5).unwrap().labels());
    assert_eq!(config.get(7).unwrap().labels(), CycleConfig::defaults().get(7).unwrap().labels());
}

#[test]
fn test_failed_import_leaves_config_untouched() {
    let mut session = Session::new(CycleConfig::defaults(), ViewState::new(date("2024-02-10")));
    let before = session.config();

    assert!(session.import_text("[1, 2, 3]").is_err());
    assert!(session.import_text("{not json").is_err());
    assert_eq!(*session.config(), *before);
}

#[test]
fn test_export_then_import_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = CycleConfig::defaults().with_label(7, 0, "Sun").unwrap();
    let now = "2024-02-10T08:09:10".parse().unwrap();

    let written = SettingsStore::export(&config, dir.path(), now).unwrap();
    assert!(written.ends_with("cycle-labels-20240210-080910.json"));
    assert_eq!(SettingsStore::read_import(&written).unwrap(), config);
}

#[test]
fn test_settings_survive_a_new_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("labels.json");
    let view = ViewState::new(date("2024-02-10"));

    let mut first = Session::open(SettingsStore::open(&path), view);
    first.set_label(2, 1, "  Yang  ").unwrap();

    let second = Session::open(SettingsStore::open(&path), view);
    assert_eq!(second.config().get(2).unwrap().label(1), Some("Yang"));
}

#[test]
fn test_selection_falls_back_when_outside_view() {
    let config = CycleConfig::defaults();
    let today = date("2024-02-10");
    let elsewhere = date("2024-05-20");

    let current = layout_month(today.year_month(), &config, &today, Some(&elsewhere));
    assert_eq!(current.selected, today);

    let march: YearMonth = "2024-03".parse().unwrap();
    let other = layout_month(march, &config, &today, Some(&elsewhere));
    assert_eq!(other.selected, date("2024-03-01"));
    assert!(other.pointer.is_none());
}

#[test]
fn test_navigation_from_fragment() {
    let config = CycleConfig::defaults();
    let mut view = ViewState::from_fragment("#!2024-01", date("2024-02-10"));
    view.select(date("2024-01-31"));
    assert!(view.shift_month(1));

    let layout = view.render(&config);
    assert_eq!(layout.selected, date("2024-02-29"));
    assert_eq!(view.fragment(), "#2024-02");
    assert!(render_text(&layout).contains("29日:"));
}
