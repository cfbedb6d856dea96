use skyglow::model::Model;
use std::path::{Path, PathBuf};

/// Get the path to the bundled example model.
fn get_model_dir() -> PathBuf {
    Path::new(file!())
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("models")
        .join("gainesville")
}

/// An integration test which attempts to load the example model
#[test]
fn test_model_from_path() {
    let model = Model::from_path(get_model_dir()).unwrap();

    // Six zones, a cost entry for each of the twelve policies, two presets
    assert_eq!(model.zones.len(), 6);
    assert_eq!(model.costs.len(), 12);
    assert_eq!(model.presets.len(), 2);
}
