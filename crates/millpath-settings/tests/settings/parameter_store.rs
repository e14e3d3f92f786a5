use millpath_camtools::{AnnularParameters, LinearParameters};
use millpath_settings::{ParameterStore, SettingsError};
use tempfile::TempDir;

#[test]
fn test_save_and_load_named_parameters() {
    let dir = TempDir::new().unwrap();
    let store = ParameterStore::new(dir.path());

    let params = AnnularParameters {
        inner_radius: 4.0,
        outer_radius: 9.0,
        ..Default::default()
    };
    let path = store.save("small_ring", &params).unwrap();
    assert!(path.ends_with("small_ring.c_shape.json"));

    let loaded: AnnularParameters = store.load("small_ring").unwrap();
    assert_eq!(loaded, params);
}

#[test]
fn test_list_is_per_tool() {
    let dir = TempDir::new().unwrap();
    let store = ParameterStore::new(dir.path().join("params"));
    assert!(store.list::<LinearParameters>().unwrap().is_empty());

    store.save("b", &LinearParameters::default()).unwrap();
    store.save("a", &LinearParameters::default()).unwrap();
    store.save("ring", &AnnularParameters::default()).unwrap();

    assert_eq!(store.list::<LinearParameters>().unwrap(), ["a", "b"]);
    assert_eq!(store.list::<AnnularParameters>().unwrap(), ["ring"]);
}

#[test]
fn test_missing_record() {
    let dir = TempDir::new().unwrap();
    let store = ParameterStore::new(dir.path());

    let result = store.load::<LinearParameters>("nothing");
    assert!(matches!(result, Err(SettingsError::NotFound(_))));
}

#[test]
fn test_invalid_parameters_are_not_saved() {
    let dir = TempDir::new().unwrap();
    let store = ParameterStore::new(dir.path());
    let params = LinearParameters {
        depth_step: 0.0,
        ..Default::default()
    };

    assert!(matches!(
        store.save("broken", &params),
        Err(SettingsError::InvalidParameters { .. })
    ));
    assert!(!store.path_for::<LinearParameters>("broken").exists());
}

#[test]
fn test_record_names_cannot_escape_directory() {
    let dir = TempDir::new().unwrap();
    let store = ParameterStore::new(dir.path());

    assert!(store.save("../up", &LinearParameters::default()).is_err());
    assert!(store.save("", &LinearParameters::default()).is_err());
}
