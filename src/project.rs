use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::interpreter::evaluator::{self, EvalContext};
use crate::interpreter::scope::Scope;
use crate::interpreter::value::Value;

/// The file that marks a project root.
pub const PROJECT_MARKER: &str = "rnl.rnl";

/// Scaffolds a fresh project: the `rnl.rnl` marker with its properties and
/// dependency list, and a `src/main.rnl` declaring the project module with
/// a hello-world `main`.
pub fn create(name: &str) -> io::Result<()> {
    let module_name = to_camel_case(name);
    let root = Path::new(name);

    fs::create_dir_all(root.join("src"))?;

    let rnl = format!("let properties = {{\n    name: \"{name}\"\n    moduleName: \"{module_name}\"\n}}\n\nlet dependencies = [\n\n]\n");
    fs::write(root.join(PROJECT_MARKER), rnl)?;

    let main = format!("module {module_name}\n\nfn main() {{\n    print(\"Hello, world!\")\n}}\n");
    fs::write(root.join("src").join("main.rnl"), main)?;

    Ok(())
}

/// Walks upward from the working directory looking for the `rnl.rnl`
/// project marker.
pub fn find_root() -> io::Result<PathBuf> {
    let mut dir = std::env::current_dir()?;
    loop {
        if dir.join(PROJECT_MARKER).is_file() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no rnl.rnl file found"));
        }
    }
}

/// Evaluates the project's `rnl.rnl` and extracts `properties@:moduleName`.
///
/// The marker is an ordinary source file expected to bind a top-level
/// `properties` map; its `moduleName` string names the module that
/// `src/main.rnl` must register.
pub fn module_name(root: &Path) -> Result<String, String> {
    let marker = root.join(PROJECT_MARKER);
    let source = fs::read_to_string(&marker).map_err(|err| format!("error reading {}: {err}", marker.display()))?;

    let program = crate::parse_source(&source, &marker.display().to_string()).map_err(|errors| {
                      errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
                  })?;

    let env = Scope::new();
    let mut ctx = EvalContext::new(&marker.display().to_string());
    evaluator::eval_program(&program, &env, &mut ctx).map_err(|err| err.to_string())?;

    let Some(Value::Map(properties)) = env.get("properties") else {
        return Err("properties not found in rnl.rnl file".to_string());
    };
    match properties.get_value(&Value::atom("moduleName")) {
        Some(Value::Str(name)) => Ok(name.to_string()),
        _ => Err("module name not found in properties".to_string()),
    }
}

/// `my_cool_project` → `MyCoolProject`.
fn to_camel_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::to_camel_case;

    #[test]
    fn camel_casing_project_names() {
        assert_eq!(to_camel_case("my_project"), "MyProject");
        assert_eq!(to_camel_case("app"), "App");
        assert_eq!(to_camel_case("my-cool-app"), "MyCoolApp");
    }
}
