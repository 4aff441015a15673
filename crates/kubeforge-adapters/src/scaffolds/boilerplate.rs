//! License header prepended to generated Go sources.

use std::fmt;
use std::path::Path;

use chrono::{Datelike, Local};

use kubeforge_core::{application::ports::Filesystem, error::ForgeResult};

/// Where `init` writes the header and later commands read it back from.
pub const BOILERPLATE_PATH: &str = "hack/boilerplate.go.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum License {
    #[default]
    Apache2,
    None,
}

impl License {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Apache2 => "apache2",
            Self::None => "none",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const APACHE2: &str = r#"
Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License."#;

/// Header for a new project, stamped with the current year.
pub fn generate(license: License, owner: &str) -> String {
    render(license, owner, Local::now().year())
}

fn render(license: License, owner: &str, year: i32) -> String {
    let copyright = if owner.is_empty() {
        format!("Copyright {}.", year)
    } else {
        format!("Copyright {} {}.", year, owner)
    };

    match license {
        License::Apache2 => format!("/*\n{}\n{}\n*/", copyright, APACHE2),
        License::None => format!("/*\n{}\n*/", copyright),
    }
}

/// Header of an existing project, or an empty string if it has none.
pub fn load(filesystem: &dyn Filesystem) -> ForgeResult<String> {
    let path = Path::new(BOILERPLATE_PATH);
    if !filesystem.exists(path) {
        return Ok(String::new());
    }
    Ok(filesystem.read_to_string(path)?.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;

    #[test]
    fn apache_header_includes_owner_and_year() {
        let header = render(License::Apache2, "The Fleet Authors", 2024);
        assert!(header.starts_with("/*\nCopyright 2024 The Fleet Authors.\n"));
        assert!(header.contains("Apache License, Version 2.0"));
        assert!(header.ends_with("*/"));
    }

    #[test]
    fn no_license_is_copyright_only() {
        assert_eq!(render(License::None, "", 2024), "/*\nCopyright 2024.\n*/");
    }

    #[test]
    fn load_reads_existing_header() {
        let fs = MemoryFilesystem::new().with_file(BOILERPLATE_PATH, "/*\nmine\n*/\n");
        assert_eq!(load(&fs).unwrap(), "/*\nmine\n*/");
        assert_eq!(load(&MemoryFilesystem::new()).unwrap(), "");
    }
}
