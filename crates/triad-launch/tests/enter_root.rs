//! Binding with the default host changes the process working directory, so
//! this lives in its own test binary.

use std::fs;

use triad_launch::{AxumHost, BoundServer};

#[tokio::test]
async fn default_host_enters_served_root() {
    let original = std::env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dist = tmp.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("index.html"), "<title>Triple Triad</title>").unwrap();

    let server = AxumHost::new().bind_axum(&dist, "127.0.0.1:0").await.unwrap();

    let cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(&original).unwrap();
    assert_eq!(cwd, dist.canonicalize().unwrap());
    assert_ne!(server.local_addr().port(), 0);
}
