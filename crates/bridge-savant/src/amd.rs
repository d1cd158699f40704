//! Artifact-meta-data document generation.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::artifact::Dependencies;
use crate::error::SavantError;
use crate::license::License;

/// The AMD document published next to every imported artifact: its
/// licenses and its dependencies projected into Savant groups.
#[derive(Debug, Clone)]
pub struct ArtifactMetaData {
    pub licenses: Vec<License>,
    pub dependencies: Dependencies,
}

impl ArtifactMetaData {
    /// Render the document as indented UTF-8 XML.
    ///
    /// # Errors
    /// Returns an error if XML generation fails.
    pub fn to_xml(&self) -> Result<String, SavantError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;
        writer
            .write_event(Event::Start(BytesStart::new("artifact-meta-data")))
            .map_err(xml_err)?;

        for license in &self.licenses {
            let mut element = BytesStart::new("license");
            element.push_attribute(("type", license.identifier()));
            writer.write_event(Event::Empty(element)).map_err(xml_err)?;
        }

        if !self.dependencies.is_empty() {
            writer
                .write_event(Event::Start(BytesStart::new("dependencies")))
                .map_err(xml_err)?;

            for (name, group) in &self.dependencies.groups {
                let mut group_element = BytesStart::new("dependency-group");
                group_element.push_attribute(("name", name.as_str()));
                writer
                    .write_event(Event::Start(group_element))
                    .map_err(xml_err)?;

                for dependency in &group.dependencies {
                    let mut element = BytesStart::new("dependency");
                    element.push_attribute(("group", dependency.id.group.as_str()));
                    element.push_attribute(("project", dependency.id.project.as_str()));
                    element.push_attribute(("name", dependency.id.name.as_str()));
                    element.push_attribute(("version", dependency.version.to_string().as_str()));
                    element.push_attribute(("type", dependency.id.kind.as_str()));
                    element.push_attribute((
                        "optional",
                        if dependency.optional { "true" } else { "false" },
                    ));
                    writer.write_event(Event::Empty(element)).map_err(xml_err)?;
                }

                writer
                    .write_event(Event::End(BytesEnd::new("dependency-group")))
                    .map_err(xml_err)?;
            }

            writer
                .write_event(Event::End(BytesEnd::new("dependencies")))
                .map_err(xml_err)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("artifact-meta-data")))
            .map_err(xml_err)?;

        String::from_utf8(writer.into_inner().into_inner()).map_err(|e| SavantError::Xml {
            message: e.to_string(),
        })
    }
}

fn xml_err<E: std::fmt::Display>(e: E) -> SavantError {
    SavantError::Xml {
        message: e.to_string(),
    }
}
