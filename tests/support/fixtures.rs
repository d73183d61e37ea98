// ABOUTME: On-disk package fixtures for tests.
// ABOUTME: Builds exploded single-unit and composite package trees.

use std::fs;
use std::path::Path;

/// Write a web unit at `dir` with an appengine-web.xml declaring the given
/// application id and module name (either may be omitted).
pub fn write_unit(dir: &Path, application: Option<&str>, module: Option<&str>) {
    fs::create_dir_all(dir.join("WEB-INF")).unwrap();

    let mut body = String::new();
    if let Some(app) = application {
        body.push_str(&format!("    <application>{app}</application>\n"));
    }
    if let Some(module) = module {
        body.push_str(&format!("    <module>{module}</module>\n"));
    }

    let xml = format!(
        "<appengine-web-app xmlns=\"http://appengine.google.com/ns/1.0\">\n{body}</appengine-web-app>\n"
    );
    fs::write(dir.join("WEB-INF/appengine-web.xml"), xml).unwrap();
    fs::write(dir.join("index.html"), "ok").unwrap();
}

/// Write a web unit without its per-unit descriptor.
pub fn write_bare_unit(dir: &Path) {
    fs::create_dir_all(dir.join("WEB-INF")).unwrap();
    fs::write(dir.join("index.html"), "ok").unwrap();
}

/// Write the composite descriptor. `web_uris` entries of `None` declare a
/// module without a web facet.
pub fn write_composite_descriptor(
    root: &Path,
    library_directory: Option<&str>,
    web_uris: &[Option<&str>],
) {
    fs::create_dir_all(root.join("META-INF")).unwrap();

    let mut body = String::new();
    if let Some(dir) = library_directory {
        body.push_str(&format!("    <library-directory>{dir}</library-directory>\n"));
    }
    for uri in web_uris {
        match uri {
            Some(uri) => body.push_str(&format!(
                "    <module><web><web-uri>{uri}</web-uri></web></module>\n"
            )),
            None => body.push_str("    <module><java>util.jar</java></module>\n"),
        }
    }

    fs::write(
        root.join("META-INF/application.xml"),
        format!("<application>\n{body}</application>\n"),
    )
    .unwrap();
}

/// Write the composite-level application descriptor.
pub fn write_app_descriptor(root: &Path, application: &str) {
    fs::create_dir_all(root.join("META-INF")).unwrap();
    fs::write(
        root.join("META-INF/appengine-application.xml"),
        format!(
            "<appengine-application><application>{application}</application></appengine-application>\n"
        ),
    )
    .unwrap();
}

/// Drop a shared library jar into the package's library area.
pub fn write_library(root: &Path, lib_dir: &str, name: &str) {
    fs::create_dir_all(root.join(lib_dir)).unwrap();
    fs::write(root.join(lib_dir).join(name), "jar bytes").unwrap();
}
