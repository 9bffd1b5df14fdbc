// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
#[cfg(test)]
use pretty_assertions::assert_eq;
#[cfg(test)]
use std::fs;

const LOCALCONFIG: &str = r#""UserLocalConfigStore"
{
	"Software"
	{
		"Valve"
		{
			"Steam"
			{
				"apps"
				{
					"570"
					{
						"LaunchOptions"		"-novid"
						"LastPlayed"		"1700000000"
					}
					"730"
					{
						"LastPlayed"		"1690000000"
					}
				}
			}
		}
	}
	"friends"
	{
		"PersonaName"		"someone"
	}
}
"#;

#[test]
fn test_config_from_string() {
    let config = LocalConfig::from_str(LOCALCONFIG).expect("Failed to parse config");

    assert_eq!(config.app_ids().unwrap(), vec!["570", "730"]);
    assert_eq!(config.launch_options("570"), Some("-novid"));
    assert_eq!(config.launch_options("730"), None);
    assert_eq!(config.get("UserLocalConfigStore/friends/PersonaName"), Some("someone"));
    assert!(config.has("UserLocalConfigStore/friends"));
    assert!(!config.has("UserLocalConfigStore/enemies"));
    assert!(config.source().is_none());
}

#[test]
fn test_get_on_object_is_none() {
    let config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    assert_eq!(config.get(APPS_PATH), None);
    assert_eq!(config.get_keys(APPS_PATH).unwrap(), vec!["570", "730"]);
}

#[test]
fn test_get_keys_missing_path() {
    let config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    let err = config.get_keys("UserLocalConfigStore/nope").unwrap_err();
    assert!(matches!(err, VdfError::PathNotFound { code: Some(304), .. }));
}

#[test]
fn test_apps_without_apps_block() {
    let config = LocalConfig::from_str("\"UserLocalConfigStore\"\n{\n}\n").unwrap();
    match config.app_ids() {
        Err(VdfError::PathNotFound { path, .. }) => assert_eq!(path, APPS_PATH),
        other => panic!("expected PathNotFound, got {:?}", other),
    }
    assert!(config.apps().is_err());
}

#[test]
fn test_apps_lists_launch_options() {
    let config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    assert_eq!(
        config.apps().unwrap(),
        vec![
            AppEntry {
                app_id: "570".into(),
                launch_options: Some("-novid".into()),
            },
            AppEntry {
                app_id: "730".into(),
                launch_options: None,
            },
        ]
    );
}

#[test]
fn test_set_launch_options_updates_and_creates() {
    let mut config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    let ids = vec!["570".to_string(), "730".to_string(), "440".to_string()];

    let updated = config.set_launch_options(&ids, "gamemoderun %command%").unwrap();
    assert_eq!(updated, 3);

    for id in &ids {
        assert_eq!(config.launch_options(id), Some("gamemoderun %command%"));
    }

    // Existing keys keep their position; new ones are appended.
    assert_eq!(config.app_ids().unwrap(), vec!["570", "730", "440"]);
    assert_eq!(
        config.get_keys(&format!("{}/570", APPS_PATH)).unwrap(),
        vec!["LaunchOptions", "LastPlayed"]
    );
    assert_eq!(
        config.get_keys(&format!("{}/730", APPS_PATH)).unwrap(),
        vec!["LastPlayed", "LaunchOptions"]
    );
}

#[test]
fn test_set_launch_options_creates_apps_block() {
    let mut config = LocalConfig::from_str("").unwrap();
    config.set_launch_options(&["10".to_string()], "-x").unwrap();

    let expected = "\"UserLocalConfigStore\"\n{\n\t\"Software\"\n\t{\n\t\t\"Valve\"\n\t\t{\n\t\t\t\"Steam\"\n\t\t\t{\n\t\t\t\t\"apps\"\n\t\t\t\t{\n\t\t\t\t\t\"10\"\n\t\t\t\t\t{\n\t\t\t\t\t\t\"LaunchOptions\"\t\t\"-x\"\n\t\t\t\t\t}\n\t\t\t\t}\n\t\t\t}\n\t\t}\n\t}\n}\n";
    assert_eq!(config.to_vdf_string(), expected);
}

#[test]
fn test_set_generic_path() {
    let mut config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    config.set("UserLocalConfigStore/friends/PersonaName", "other").unwrap();
    assert_eq!(config.get("UserLocalConfigStore/friends/PersonaName"), Some("other"));
    assert!(config.set("", "x").is_err());
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("localconfig.vdf");
    fs::write(&path, LOCALCONFIG).unwrap();

    let mut config = LocalConfig::from_file(&path).expect("Failed to load config");
    assert_eq!(config.source(), Some(path.as_path()));

    config.set_launch_options(&["730".to_string()], "-dx11").unwrap();
    config.save_in_place().unwrap();

    let reloaded = LocalConfig::from_file(&path).unwrap();
    assert_eq!(reloaded.launch_options("730"), Some("-dx11"));
    assert_eq!(reloaded.launch_options("570"), Some("-novid"));
    assert_eq!(reloaded.get("UserLocalConfigStore/friends/PersonaName"), Some("someone"));
}

#[test]
fn test_unchanged_save_is_byte_identical_for_canonical_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("localconfig.vdf");
    fs::write(&path, LOCALCONFIG).unwrap();

    let config = LocalConfig::from_file(&path).unwrap();
    let out = dir.path().join("out.vdf");
    config.save(&out).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), LOCALCONFIG);
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = LocalConfig::from_file(dir.path().join("missing.vdf")).err().unwrap();
    assert!(matches!(err, VdfError::FileError { code: Some(301), .. }));
}

#[test]
fn test_save_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    let err = config.save(dir.path().join("no/such/dir/out.vdf")).unwrap_err();
    assert!(matches!(err, VdfError::FileError { code: Some(302), .. }));
}

#[test]
fn test_save_in_place_without_source() {
    let config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    assert!(matches!(
        config.save_in_place(),
        Err(VdfError::FileError { code: Some(303), .. })
    ));
}

#[test]
fn test_from_reader_and_root_access() {
    let mut config = LocalConfig::from_reader(LOCALCONFIG.as_bytes()).unwrap();
    assert_eq!(config.root().keys(), vec!["UserLocalConfigStore"]);

    config.root_mut().upsert("extra", "1").unwrap();
    let root = config.into_root();
    assert_eq!(root.keys(), vec!["UserLocalConfigStore", "extra"]);

    let again = LocalConfig::from_root(root);
    assert_eq!(again.get("extra"), Some("1"));
}

#[test]
fn test_launch_options_path() {
    assert_eq!(
        launch_options_path("570"),
        "UserLocalConfigStore/Software/Valve/Steam/apps/570/LaunchOptions"
    );
}

#[test]
fn test_set_launch_options_rejects_unquotable_args() {
    let mut config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    let before = config.to_vdf_string();

    for args in [r#"FOO="a b" %command%"#, "-novid\n-high", "-novid\r"] {
        let err = config.set_launch_options(&["570".to_string()], args).unwrap_err();
        assert!(matches!(err, VdfError::InvalidValue { code: Some(306), .. }));
    }

    // Nothing was written, not even for the ids before the failure.
    assert_eq!(config.to_vdf_string(), before);
    assert_eq!(config.launch_options("570"), Some("-novid"));
}

#[test]
fn test_set_rejects_unquotable_keys_and_values() {
    let mut config = LocalConfig::from_str(LOCALCONFIG).unwrap();

    let err = config.set("UserLocalConfigStore/bad\"key", "x").unwrap_err();
    assert!(matches!(err, VdfError::InvalidPath { code: Some(305), .. }));

    let err = config.set("UserLocalConfigStore/friends/PersonaName", "a\"b").unwrap_err();
    assert!(matches!(err, VdfError::InvalidValue { code: Some(306), .. }));

    assert_eq!(config.get("UserLocalConfigStore/friends/PersonaName"), Some("someone"));
    assert!(!config.has("UserLocalConfigStore/bad\"key"));
}

#[test]
fn test_set_launch_options_rejects_bad_app_id_before_editing() {
    let mut config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    let ids = vec!["730".to_string(), "7\n30".to_string()];

    let err = config.set_launch_options(&ids, "-dx11").unwrap_err();
    assert!(matches!(err, VdfError::InvalidPath { .. }));
    assert_eq!(config.launch_options("730"), None);
}

#[test]
fn test_accepted_args_survive_save_and_reload() {
    let mut config = LocalConfig::from_str(LOCALCONFIG).unwrap();
    let args = "FOO='a b' gamemoderun %command% -dx11 --flag=1";
    config.set_launch_options(&["570".to_string()], args).unwrap();

    let reloaded = LocalConfig::from_str(&config.to_vdf_string()).unwrap();
    assert_eq!(reloaded.launch_options("570"), Some(args));
}
