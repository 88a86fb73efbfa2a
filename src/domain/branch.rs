#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchAction {
    Create,
    Switch,
    UseCurrent,
}

impl BranchAction {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "c" | "create" => Some(BranchAction::Create),
            "s" | "switch" => Some(BranchAction::Switch),
            "u" | "use" => Some(BranchAction::UseCurrent),
            _ => None,
        }
    }
}

/// Lines of `git branch`, without the `*` marker on the checked-out branch.
pub fn parse_local_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| {
            line.trim_start()
                .strip_prefix('*')
                .unwrap_or(line)
                .trim()
                .to_string()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Short names of `origin/*` branches from `git branch -r`, deduplicated and
/// sorted. The symbolic `origin/HEAD` entry is skipped.
pub fn parse_remote_branches<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut branches = lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.contains("HEAD"))
        .filter_map(|line| line.strip_prefix("origin/"))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();
    branches.sort();
    branches.dedup();
    branches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_branch_action() {
        assert_eq!(BranchAction::from_str("c"), Some(BranchAction::Create));
        assert_eq!(BranchAction::from_str(" Switch "), Some(BranchAction::Switch));
        assert_eq!(BranchAction::from_str("U"), Some(BranchAction::UseCurrent));
        assert_eq!(BranchAction::from_str("delete"), None);
    }

    #[test]
    fn strips_current_branch_marker() {
        let output = "  develop\n* feature/login\n  master\n\n";
        assert_eq!(
            parse_local_branches(output),
            vec!["develop", "feature/login", "master"]
        );
    }

    #[test]
    fn dedupes_and_sorts_remote_branches() {
        let raw = [
            "origin/main",
            "origin/HEAD -> origin/main",
            "origin/main",
            "origin/dev",
        ];
        assert_eq!(parse_remote_branches(raw), vec!["dev", "main"]);
    }

    #[test]
    fn ignores_other_remotes() {
        let output = "  origin/feature/a\n  upstream/main\n  origin/HEAD -> origin/main\n";
        assert_eq!(parse_remote_branches(output.lines()), vec!["feature/a"]);
    }
}
