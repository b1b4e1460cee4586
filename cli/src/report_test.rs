use super::*;
use kidoo::content::records::Setting;

#[test]
fn check_line_formats_each_outcome() {
    let ok = CheckLine { resource: Resource::Programs, result: Ok(3), elapsed: Duration::from_millis(42) };
    assert_eq!(ok.to_string(), "OK    programs            42ms  3 items");

    let empty = CheckLine { resource: Resource::Faqs, result: Ok(0), elapsed: Duration::from_millis(7) };
    assert!(empty.to_string().starts_with("EMPTY faqs"));

    let failed = CheckLine {
        resource: Resource::Events,
        result: Err(ApiError::Status { status: 500, body: String::new() }),
        elapsed: Duration::ZERO,
    };
    assert!(failed.to_string().ends_with("API response error: status 500"));
}

#[test]
fn section_report_from_failed_state() {
    let state: LoadState<u8> = LoadState::Failed { error: ApiError::Unavailable, items: vec![1, 2], used_fallback: true };
    let report = SectionReport::from_state(Resource::Blogs, &state);
    assert_eq!(report.items, 2);
    assert!(report.used_fallback);
    assert_eq!(report.to_string(), "blogs: 2 items from sample (API not available in this environment)");
}

#[test]
fn section_report_from_server_state() {
    let state: LoadState<u8> = LoadState::Ready { items: vec![1], used_fallback: false };
    assert_eq!(SectionReport::from_state(Resource::Programs, &state).to_string(), "programs: 1 items from server");
}

#[test]
fn settings_rows_mark_overrides() {
    let settings = SettingsMap::from_settings([Setting { key: EMAIL.into(), value: Some("hi@kidoo.test".into()) }]);
    let rows = settings_rows(&settings);
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[1], (EMAIL, "hi@kidoo.test".to_owned(), true));
    assert_eq!(rows[0], (PHONE_NUMBER, "(555) 123-4567".to_owned(), false));
}

#[test]
fn resource_names_lists_all() {
    let names = resource_names();
    assert!(names.starts_with("programs, gallery"));
    assert!(names.contains("about-features"));
}
