// Configuration failures must be fatal before anything gets launched:
// the SDK paths below do not exist, so reaching the launcher (or adb)
// would produce a different error than the ones asserted here.

use avdboot::cli::StartArgs;
use avdboot::commands::cmd_start;

#[tokio::test]
async fn test_unknown_image_fails_before_launch() {
    let home = tempfile::tempdir().unwrap();
    let avd_dir = home.path().join(".android").join("avd");
    std::fs::create_dir_all(&avd_dir).unwrap();
    std::fs::write(avd_dir.join("Pixel_3_API_29.ini"), "").unwrap();
    std::env::set_var("HOME", home.path());

    let args = StartArgs {
        image: Some("Pixel_4_API_30".to_string()),
        sdk_home: Some("/nonexistent/sdk".to_string()),
        skin: None,
        ram: None,
    };

    let err = cmd_start(args).await.unwrap_err();
    assert!(err.to_string().contains("not found"), "got: {:#}", err);
}

#[tokio::test]
async fn test_missing_image_input_is_fatal() {
    let args = StartArgs {
        image: None,
        sdk_home: Some("/opt/sdk".to_string()),
        skin: None,
        ram: None,
    };

    let err = cmd_start(args).await.unwrap_err();
    assert!(err.to_string().contains("image_name"), "got: {:#}", err);
}
