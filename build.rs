use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

// Places the sample tracker config from /src next to the built executable,
// which is where the binary looks for it when started without arguments.
pub fn main() {
    println!("cargo:rerun-if-changed=src/{}", CONFIG_FILE_NAME);

    let manifest_dir = match env::var_os("CARGO_MANIFEST_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => return,
    };
    let exe_dir = match env::var_os("OUT_DIR").and_then(|out| executable_dir(Path::new(&out))) {
        Some(dir) => dir,
        None => {
            println!("cargo:warning=Could not locate the executable directory, config not copied");
            return;
        }
    };

    let source = manifest_dir.join("src").join(CONFIG_FILE_NAME);
    let destination = exe_dir.join(CONFIG_FILE_NAME);
    if destination.exists() {
        // Keep whatever credentials and jobs were filled in locally.
        return;
    }
    if let Err(e) = fs::copy(&source, &destination) {
        println!(
            "cargo:warning=Failed to copy tracker config from {:?} to {:?}: {}",
            source, destination, e
        );
    }
}

// OUT_DIR is target/<profile>/build/<crate>-<hash>/out
fn executable_dir(out_dir: &Path) -> Option<PathBuf> {
    out_dir
        .ancestors()
        .nth(3)
        .map(|dir| dir.to_path_buf())
}
