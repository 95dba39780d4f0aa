use logfence::{Error, HtmlTheme, Level, Nature};

#[test]
fn level_ordering_gates_debug_below_info() {
    assert!(Level::Debug < Level::Info);
    assert_eq!(Level::default(), Level::Info);
}

#[test]
fn level_parses_case_insensitively() {
    assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!(" INFO ".parse::<Level>().unwrap(), Level::Info);
    assert!(matches!("trace".parse::<Level>(), Err(Error::Validation(_))));
}

#[test]
fn level_round_trips_through_display() {
    for level in Level::all() {
        assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
    }
}

#[test]
fn nature_parses_and_displays_uppercase() {
    assert_eq!("warning".parse::<Nature>().unwrap(), Nature::Warning);
    assert_eq!(Nature::Error.to_string(), "ERROR");
    assert!(matches!("fatal".parse::<Nature>(), Err(Error::Validation(_))));
}

#[test]
fn nature_covers_all_three_variants() {
    assert_eq!(Nature::all().len(), 3);
}

#[test]
fn theme_parses_lowercase_names() {
    assert_eq!("dark".parse::<HtmlTheme>().unwrap(), HtmlTheme::Dark);
    assert_eq!(" Light ".parse::<HtmlTheme>().unwrap(), HtmlTheme::Light);
    assert!(matches!("neon".parse::<HtmlTheme>(), Err(Error::Validation(_))));
    assert_eq!(HtmlTheme::Dark.css_class(), "theme-dark");
}
