use tempfile::tempdir;

#[test]
fn init_creates_scoped_log_file() {
    let dir = tempdir().unwrap();
    eatery::logger::init_for_app_in(dir.path(), "eatery_test").unwrap();
    log::info!("logger smoke test");
    let logfile = dir.path().join("eatery_test_logs").join("eatery_test.log");
    assert!(logfile.exists());
}
