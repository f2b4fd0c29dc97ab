use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;

use super::{Language, Linter};
use crate::config::{PolylintConfig, ROOT_PLACEHOLDER, expand_root};
use crate::shared::paths;

/// Ordered, immutable set of linters built once at startup
#[derive(Debug, Clone, Default)]
pub struct Registry {
    linters: Vec<Linter>,
}

impl Registry {
    pub fn new(linters: Vec<Linter>) -> Self {
        Self { linters }
    }

    /// Resolve the configured linters against the source root
    pub fn from_config(config: &PolylintConfig, source_root: &Path) -> Result<Self> {
        config.validate()?;

        let linters = config
            .linters
            .iter()
            .map(|cfg| {
                let expand = |s: &str| expand_root(s, source_root);
                // Bare program names stay as-is for a PATH lookup
                let program = if cfg.command.contains(ROOT_PLACEHOLDER) {
                    paths::normalize(expand(&cfg.command)).display().to_string()
                } else {
                    cfg.command.clone()
                };

                Linter {
                    key: cfg.key,
                    roots: cfg
                        .roots
                        .iter()
                        .map(|root| paths::resolve(source_root, expand(root)))
                        .collect(),
                    extensions: cfg.extensions.clone(),
                    program,
                    args: cfg.args.iter().map(|arg| expand_arg(arg, source_root)).collect(),
                    env: cfg
                        .env
                        .iter()
                        .map(|(name, value)| (name.clone(), expand(value)))
                        .collect(),
                    cwd: cfg
                        .cwd
                        .as_deref()
                        .map(|cwd| paths::resolve(source_root, expand(cwd))),
                    policy: cfg.policy,
                }
            })
            .collect();

        Ok(Self { linters })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Linter> {
        self.linters.iter()
    }

    pub fn len(&self) -> usize {
        self.linters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.linters.is_empty()
    }

    /// Linters whose key is in `selected`, in registry order. An empty
    /// selection means every linter.
    pub fn select<'a>(&'a self, selected: &'a BTreeSet<Language>) -> impl Iterator<Item = &'a Linter> {
        self.linters
            .iter()
            .filter(move |linter| selected.is_empty() || selected.contains(&linter.key))
    }
}

/// Expand `{root}` in an argument and normalize the path it introduces.
///
/// An `--option=` prefix before the placeholder is kept verbatim.
fn expand_arg(arg: &str, source_root: &Path) -> String {
    let Some(at) = arg.find(ROOT_PLACEHOLDER) else {
        return arg.to_string();
    };
    let split = arg[..at].rfind('=').map_or(0, |eq| eq + 1);
    let (prefix, path) = arg.split_at(split);
    if !path.starts_with(ROOT_PLACEHOLDER) {
        return expand_root(arg, source_root);
    }
    let path = paths::normalize(expand_root(path, source_root));
    format!("{prefix}{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::core::default_figment;
    use crate::linters::OutputPolicy;
    use std::path::PathBuf;

    fn default_registry() -> Registry {
        let mut config: PolylintConfig = default_figment().extract().expect("defaults load");
        config.general.source_root = "/repo/src".into();
        let root = config.source_root(Path::new("/"));
        Registry::from_config(&config, &root).unwrap()
    }

    #[test]
    fn test_default_registry_resolution() {
        let registry = default_registry();
        assert_eq!(registry.len(), 4);

        let linters: Vec<&Linter> = registry.iter().collect();

        let cpp = linters[0];
        assert_eq!(cpp.key, Language::Cpp);
        assert_eq!(
            cpp.roots,
            vec![PathBuf::from("/repo/src/atom"), PathBuf::from("/repo/src/brightray")]
        );
        assert_eq!(cpp.program, "cpplint.py");
        assert_eq!(cpp.cwd, None);

        let py = linters[1];
        assert_eq!(py.policy, OutputPolicy::Quiet);
        assert_eq!(
            py.args,
            vec!["--rcfile=/repo/third_party/depot_tools/pylintrc".to_string()]
        );
        assert_eq!(py.env["PYTHONPATH"], "/repo/src/script");

        let js = linters[2];
        assert_eq!(js.program, "/repo/src/node_modules/.bin/standard");
        assert_eq!(js.cwd, Some(PathBuf::from("/repo/src")));

        let spec = linters[3];
        assert_eq!(spec.roots, vec![PathBuf::from("/repo/src/spec")]);
        assert_eq!(spec.cwd, Some(PathBuf::from("/repo/src/spec")));
    }

    #[test]
    fn test_expand_arg_normalizes_root_paths() {
        let root = Path::new("/repo/src");
        assert_eq!(expand_arg("{root}/../lint.cfg", root), "/repo/lint.cfg");
        assert_eq!(
            expand_arg("--config={root}/./tools/../rules", root),
            "--config=/repo/src/rules"
        );
        assert_eq!(expand_arg("--fix", root), "--fix");
        assert_eq!(expand_arg("--name=x{root}", root), "--name=x/repo/src");
    }

    #[test]
    fn test_select_all_when_nothing_selected() {
        let registry = default_registry();
        let keys: Vec<Language> = registry.select(&BTreeSet::new()).map(|l| l.key).collect();
        assert_eq!(
            keys,
            vec![
                Language::Cpp,
                Language::Python,
                Language::JavaScript,
                Language::JavaScript
            ]
        );
    }

    #[test]
    fn test_select_keeps_registry_order() {
        let registry = default_registry();
        let selected: BTreeSet<Language> = [Language::JavaScript, Language::Cpp].into();
        let keys: Vec<Language> = registry.select(&selected).map(|l| l.key).collect();
        assert_eq!(
            keys,
            vec![Language::Cpp, Language::JavaScript, Language::JavaScript]
        );
    }
}
