use std::env;
use std::path::PathBuf;

const LIBRARY_DIR_VARIABLE: &str = "LIBVLC_LIB_DIR";

fn main() {
    // Make sure the build script is re-run if our env variable is changed.
    println!("cargo:rerun-if-env-changed={}", LIBRARY_DIR_VARIABLE);

    // Nothing to link against unless the real entry points were requested.
    if env::var("CARGO_FEATURE_LIBVLC_FUNCTIONS").is_err() {
        return;
    }

    let windows = env::var("TARGET")
        .map(|target| target.contains("windows"))
        .unwrap_or(false);

    if let Ok(dir) = env::var(LIBRARY_DIR_VARIABLE) {
        println!("cargo:rustc-link-search=native={}", dir);
    } else if windows {
        if let Some(dirs) = get_default_library_dir() {
            for dir in dirs {
                println!("cargo:rustc-link-search=native={}", dir);
            }
        }
    }

    let library_name = if windows { "libvlc" } else { "vlc" };
    println!("cargo:rustc-link-lib={}", library_name);
}

// Returns the default library dirs on Windows.
// The default dir is where the VLC installer puts the SDK.
fn get_default_library_dir() -> Option<impl Iterator<Item = String>> {
    let host = env::var("HOST").ok()?;

    // If the host isn't Windows we don't have %programfiles%.
    if !host.contains("windows") {
        return None;
    }

    let programfiles = env::var("programfiles").into_iter();

    // Add Program Files from the other bitness. This would be Program Files (x86) with a 64-bit
    // host and regular Program Files with a 32-bit host running on a 64-bit system.
    let programfiles = programfiles.chain(env::var(if host.starts_with("i686") {
        "programw6432"
    } else {
        "programfiles(x86)"
    }));

    Some(programfiles.filter_map(|programfiles| {
        let mut path = PathBuf::from(&programfiles);
        path.push("VideoLAN");
        path.push("VLC");
        path.push("sdk");
        path.push("lib");
        path.to_str().map(|s| s.to_owned())
    }))
}
