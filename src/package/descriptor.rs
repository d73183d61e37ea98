// ABOUTME: Descriptor extraction for the small fixed vocabulary skylift needs.
// ABOUTME: Pulls scalar tokens and the composite module list out of descriptor XML.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use thiserror::Error;

/// Per-unit descriptor carrying the module name and application id.
pub const APPENGINE_WEB_XML: &str = "WEB-INF/appengine-web.xml";

/// Composite-level descriptor carrying the application id.
pub const APPENGINE_APPLICATION_XML: &str = "META-INF/appengine-application.xml";

/// Composite descriptor declaring web modules and the shared library area.
pub const APPLICATION_XML: &str = "META-INF/application.xml";

/// Library area used when the composite descriptor declares none.
pub const DEFAULT_LIB_DIR: &str = "lib";

pub const TOKEN_MODULE: &str = "module";
pub const TOKEN_APPLICATION: &str = "application";

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Extract requested scalar tokens from descriptor XML.
///
/// Returns a mapping from token name to its text value; tokens absent from
/// the descriptor are simply omitted. Only the first occurrence of each
/// token is taken.
pub fn parse_tokens(
    xml: &str,
    requested: &[&str],
) -> Result<HashMap<String, String>, DescriptorError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut tokens = HashMap::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                current = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::End(_) => current = None,
            Event::Text(t) => {
                if let Some(name) = current.as_deref()
                    && requested.contains(&name)
                    && !tokens.contains_key(name)
                {
                    let value = t.unescape().map_err(quick_xml::Error::from)?;
                    tokens.insert(name.to_string(), value.trim().to_string());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tokens)
}

/// The composite descriptor, reduced to what rearrangement needs.
#[derive(Debug, Clone, Default)]
pub struct CompositeDescriptor {
    /// Declared shared library directory, if any.
    pub library_directory: Option<String>,
    /// Declared modules, in document order.
    pub modules: Vec<CompositeModule>,
}

/// One `<module>` declaration of the composite descriptor.
#[derive(Debug, Clone, Default)]
pub struct CompositeModule {
    /// The web URI the module's content lives under. Modules without one
    /// carry no web facet and are dropped from registration.
    pub web_uri: Option<String>,
}

/// Parse the composite descriptor (`META-INF/application.xml`).
pub fn parse_composite(xml: &str) -> Result<CompositeDescriptor, DescriptorError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut descriptor = CompositeDescriptor::default();
    let mut stack: Vec<String> = Vec::new();
    let mut current_module: Option<CompositeModule> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == "module" && stack.len() == 1 {
                    current_module = Some(CompositeModule::default());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == "module" && stack.len() == 1 {
                    descriptor.modules.push(CompositeModule::default());
                }
            }
            Event::End(_) => {
                if stack.pop().as_deref() == Some("module")
                    && stack.len() == 1
                    && let Some(module) = current_module.take()
                {
                    descriptor.modules.push(module);
                }
            }
            Event::Text(t) => {
                let value = t.unescape().map_err(quick_xml::Error::from)?;
                let value = value.trim();
                match stack.last().map(String::as_str) {
                    Some("library-directory") => {
                        descriptor.library_directory = Some(value.to_string());
                    }
                    Some("web-uri") => {
                        if let Some(module) = current_module.as_mut() {
                            module.web_uri = Some(value.to_string());
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(descriptor)
}
