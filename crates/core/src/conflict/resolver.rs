//! Mechanical conflict resolution.
//!
//! The [`ConflictResolver`] runs two passes over file content:
//!
//! 1. **Special case** -- deletes regions whose `ours` side is a single known
//!    dead declaration and whose `theirs` side is empty.
//! 2. **Generic** -- replaces every remaining region labelled with the
//!    incoming branch by the side a [`ResolutionPolicy`] picks.
//!
//! Regions carrying any other end label are never touched.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::outcome::{BatchReport, FileOutcome};
use super::parser::{self, ConflictRegion, Segment};
use crate::config::{BatchConfig, MarkerConfig, SweepConfig};
use crate::errors::{ConfigError, ResolveError};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Which side of a region survives the generic pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// Keep the incoming side, discard ours.
    #[default]
    KeepTheirs,
    /// Keep our side, discard the incoming one.
    KeepOurs,
    /// Discard both sides and all markers.
    DeleteRegion,
}

impl ResolutionPolicy {
    /// The text that replaces `region` under this policy.
    pub fn select<'a>(&self, region: &ConflictRegion<'a>) -> &'a str {
        match self {
            Self::KeepTheirs => region.theirs,
            Self::KeepOurs => region.ours,
            Self::DeleteRegion => "",
        }
    }
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepTheirs => write!(f, "keep-theirs"),
            Self::KeepOurs => write!(f, "keep-ours"),
            Self::DeleteRegion => write!(f, "delete-region"),
        }
    }
}

impl FromStr for ResolutionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep-theirs" | "theirs" => Ok(Self::KeepTheirs),
            "keep-ours" | "ours" => Ok(Self::KeepOurs),
            "delete-region" | "delete" => Ok(Self::DeleteRegion),
            other => Err(ConfigError::InvalidValue {
                field: "policy".into(),
                detail: format!(
                    "unknown policy '{other}' (expected keep-theirs, keep-ours or delete-region)"
                ),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution result
// ---------------------------------------------------------------------------

/// Content after both passes, with per-pass region counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub content: String,
    /// Regions deleted by the special-case pass.
    pub special_removed: usize,
    /// Regions rewritten by the generic pass.
    pub generic_resolved: usize,
}

impl Resolution {
    pub fn regions(&self) -> usize {
        self.special_removed + self.generic_resolved
    }
}

// ---------------------------------------------------------------------------
// ConflictResolver
// ---------------------------------------------------------------------------

/// Applies the resolution passes to content, files, and batches of files.
#[derive(Debug, Clone)]
pub struct ConflictResolver {
    markers: MarkerConfig,
    /// One anchored pattern per dead declaration: `^\s*<declaration>$`.
    declarations: Vec<Regex>,
    /// Directory relative paths are resolved against.
    root: PathBuf,
    /// When set, files are analysed but never written.
    dry_run: bool,
}

impl ConflictResolver {
    /// Build a resolver for the given markers and special-case declarations.
    pub fn new(markers: MarkerConfig, declarations: &[String]) -> Result<Self, ConfigError> {
        let declarations = declarations
            .iter()
            .map(|decl| {
                Regex::new(&format!(r"^\s*{}$", regex_lite::escape(decl))).map_err(|e| {
                    ConfigError::InvalidValue {
                        field: "special_case.declarations".into(),
                        detail: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            markers,
            declarations,
            root: PathBuf::from("."),
            dry_run: false,
        })
    }

    /// Build a resolver from a loaded [`SweepConfig`].
    pub fn from_config(config: &SweepConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.markers.clone(), &config.special_case.declarations)?
            .with_root(&config.root))
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn markers(&self) -> &MarkerConfig {
        &self.markers
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // -----------------------------------------------------------------------
    // Content passes
    // -----------------------------------------------------------------------

    /// Delete every region that only adds a known dead declaration on our side.
    ///
    /// Content without such a region is returned unchanged.
    pub fn resolve_special_case(&self, content: &str) -> String {
        self.special_case_pass(content).0
    }

    /// Replace every region labelled with the incoming branch by the side
    /// `policy` keeps. Regions with other labels are left byte-identical.
    pub fn resolve_generic(&self, content: &str, policy: ResolutionPolicy) -> String {
        self.generic_pass(content, policy).0
    }

    /// Run the special-case pass followed by the generic pass.
    pub fn resolve_content(&self, content: &str, policy: ResolutionPolicy) -> Resolution {
        let (stripped, special_removed) = self.special_case_pass(content);
        let (content, generic_resolved) = self.generic_pass(&stripped, policy);
        Resolution {
            content,
            special_removed,
            generic_resolved,
        }
    }

    fn special_case_pass(&self, content: &str) -> (String, usize) {
        self.rewrite(content, |region| {
            self.is_dead_declaration(region).then_some("")
        })
    }

    fn generic_pass(&self, content: &str, policy: ResolutionPolicy) -> (String, usize) {
        self.rewrite(content, |region| Some(policy.select(region)))
    }

    /// Whether `region` carries the incoming-branch end label.
    pub fn matches_incoming(&self, region: &ConflictRegion<'_>) -> bool {
        region.end_label == self.markers.incoming_label
    }

    /// Whether `region` only adds a known dead declaration on our side.
    pub fn is_dead_declaration(&self, region: &ConflictRegion<'_>) -> bool {
        if region.base.is_some() || !region.theirs.is_empty() {
            return false;
        }
        let Some(line) = region.ours.strip_suffix('\n') else {
            return false;
        };
        let line = line.strip_suffix('\r').unwrap_or(line);
        !line.contains('\n') && self.declarations.iter().any(|re| re.is_match(line))
    }

    /// Rebuild `content`, replacing each region labelled with the incoming
    /// branch by whatever `pick` returns. `None` keeps the region as-is.
    fn rewrite<'a, F>(&self, content: &'a str, mut pick: F) -> (String, usize)
    where
        F: FnMut(&ConflictRegion<'a>) -> Option<&'a str>,
    {
        let mut out = String::with_capacity(content.len());
        let mut rewritten = 0;

        for segment in parser::parse(content, &self.markers.ours_label) {
            let region = match segment {
                Segment::Text(text) => {
                    out.push_str(text);
                    continue;
                }
                Segment::Region(region) => region,
            };

            if !self.matches_incoming(&region) {
                debug!(
                    line = region.start_line,
                    label = region.end_label,
                    "leaving conflict from another branch untouched"
                );
                out.push_str(region.raw);
                continue;
            }

            match pick(&region) {
                Some(kept) => {
                    // An unterminated end marker means the region closed the
                    // file; keep the file's missing trailing newline.
                    if region.terminated {
                        out.push_str(kept);
                    } else {
                        out.push_str(strip_line_ending(kept));
                    }
                    rewritten += 1;
                }
                None => out.push_str(region.raw),
            }
        }

        (out, rewritten)
    }

    // -----------------------------------------------------------------------
    // Files and batches
    // -----------------------------------------------------------------------

    /// Resolve the conflicts in a single file, rewriting it in place.
    ///
    /// The write is a plain overwrite, not an atomic rename. I/O failures are
    /// reported as [`FileOutcome::Error`] rather than returned.
    pub fn resolve_file(&self, path: &Path, policy: ResolutionPolicy) -> FileOutcome {
        match self.try_resolve_file(path, policy) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to process file");
                FileOutcome::Error {
                    path: path.to_path_buf(),
                    cause: e.cause(),
                }
            }
        }
    }

    fn try_resolve_file(
        &self,
        path: &Path,
        policy: ResolutionPolicy,
    ) -> Result<FileOutcome, ResolveError> {
        let content = fs::read_to_string(path).map_err(|source| ResolveError::Read {
            path: path.display().to_string(),
            source,
        })?;

        if !parser::has_start_marker(&content, &self.markers.ours_label) {
            info!(path = %path.display(), "no conflicts found");
            return Ok(FileOutcome::NoConflictFound {
                path: path.to_path_buf(),
            });
        }

        let resolution = self.resolve_content(&content, policy);

        if self.dry_run {
            debug!(path = %path.display(), "dry run, not writing");
        } else {
            fs::write(path, &resolution.content).map_err(|source| ResolveError::Write {
                path: path.display().to_string(),
                source,
            })?;
        }

        info!(
            path = %path.display(),
            %policy,
            special = resolution.special_removed,
            generic = resolution.generic_resolved,
            "resolved conflicts"
        );
        Ok(FileOutcome::Resolved {
            path: path.to_path_buf(),
            regions: resolution.regions(),
        })
    }

    /// Resolve every existing file in `paths`, in order.
    ///
    /// Paths that do not exist are skipped without producing an outcome.
    pub fn resolve_batch<P: AsRef<Path>>(
        &self,
        paths: &[P],
        policy: ResolutionPolicy,
    ) -> Vec<FileOutcome> {
        paths
            .iter()
            .filter_map(|p| {
                let path = self.locate(p.as_ref());
                if !path.exists() {
                    debug!(path = %path.display(), "skipping missing file");
                    return None;
                }
                Some(self.resolve_file(&path, policy))
            })
            .collect()
    }

    /// Run one configured batch.
    pub fn run_batch(&self, batch: &BatchConfig) -> BatchReport {
        info!(
            batch = %batch.name,
            policy = %batch.policy,
            files = batch.paths.len(),
            "running batch"
        );
        BatchReport {
            name: batch.name.clone(),
            policy: batch.policy,
            outcomes: self.resolve_batch(batch.paths.as_slice(), batch.policy),
        }
    }

    /// Resolve `path` against the configured root.
    pub fn locate(&self, path: &Path) -> PathBuf {
        if self.root == Path::new(".") {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

fn strip_line_ending(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "test/test-failure-analysis";

    fn resolver() -> ConflictResolver {
        ConflictResolver::from_config(&SweepConfig::default()).unwrap()
    }

    fn both_passes(r: &ConflictResolver, content: &str) -> String {
        r.resolve_content(content, ResolutionPolicy::KeepTheirs).content
    }

    #[test]
    fn test_generic_keeps_theirs() {
        let input = format!("<<<<<<< HEAD\nconst x = 1\n=======\nconst x = 2\n>>>>>>> {LABEL}\n");
        let out = resolver().resolve_generic(&input, ResolutionPolicy::KeepTheirs);
        assert_eq!(out, "const x = 2\n");
    }

    #[test]
    fn test_special_case_removes_vi_declaration() {
        let input = format!(
            "<<<<<<< HEAD\n    const vi: typeof import('vitest').vi\n=======\n>>>>>>> {LABEL}\n"
        );
        let r = resolver();
        assert_eq!(r.resolve_special_case(&input), "");
        assert_eq!(both_passes(&r, &input), "");
    }

    #[test]
    fn test_other_branch_left_untouched() {
        let input = "<<<<<<< HEAD\n    const vi: typeof import('vitest').vi\n=======\n>>>>>>> some/other-branch\n\
                     <<<<<<< HEAD\na\n=======\nb\n>>>>>>> some/other-branch\n";
        let r = resolver();
        assert_eq!(r.resolve_special_case(input), input);
        assert_eq!(r.resolve_generic(input, ResolutionPolicy::KeepTheirs), input);
        assert_eq!(r.resolve_generic(input, ResolutionPolicy::DeleteRegion), input);
    }

    #[test]
    fn test_special_case_is_identity_without_declaration() {
        let r = resolver();
        let inputs = [
            "plain text\n".to_string(),
            format!("<<<<<<< HEAD\nconst x = 1\n=======\nconst x = 2\n>>>>>>> {LABEL}\n"),
            // Declaration present but theirs is not empty.
            format!(
                "<<<<<<< HEAD\nconst vi: typeof import('vitest').vi\n=======\nimport {{ vi }} from 'vitest'\n>>>>>>> {LABEL}\n"
            ),
            // Extra text next to the declaration.
            format!(
                "<<<<<<< HEAD\nconst vi: typeof import('vitest').vi\nconst y = 1\n=======\n>>>>>>> {LABEL}\n"
            ),
            // Trailing text on the declaration line.
            format!("<<<<<<< HEAD\nconst vi: typeof import('vitest').vi;\n=======\n>>>>>>> {LABEL}\n"),
        ];
        for input in &inputs {
            assert_eq!(&r.resolve_special_case(input), input);
        }
    }

    #[test]
    fn test_surrounding_text_is_preserved() {
        let input = format!(
            "import {{ describe }} from 'vitest'\n\n<<<<<<< HEAD\nold()\n=======\nnew()\nnewer()\n>>>>>>> {LABEL}\n\nexport {{}}\n"
        );
        let out = resolver().resolve_generic(&input, ResolutionPolicy::KeepTheirs);
        assert_eq!(
            out,
            "import { describe } from 'vitest'\n\nnew()\nnewer()\n\nexport {}\n"
        );
    }

    #[test]
    fn test_multiple_regions_left_to_right() {
        let input = format!(
            "<<<<<<< HEAD\na1\n=======\nb1\n>>>>>>> {LABEL}\nmid\n<<<<<<< HEAD\na2\n=======\nb2\n>>>>>>> {LABEL}\n"
        );
        let resolution = resolver().resolve_content(&input, ResolutionPolicy::KeepTheirs);
        assert_eq!(resolution.content, "b1\nmid\nb2\n");
        assert_eq!(resolution.generic_resolved, 2);
        assert_eq!(resolution.special_removed, 0);
    }

    #[test]
    fn test_mixed_labels_only_expected_resolved() {
        let foreign = "<<<<<<< HEAD\nx\n=======\ny\n>>>>>>> feature/other\n";
        let input = format!("{foreign}<<<<<<< HEAD\na\n=======\nb\n>>>>>>> {LABEL}\n");
        let out = resolver().resolve_generic(&input, ResolutionPolicy::KeepTheirs);
        assert_eq!(out, format!("{foreign}b\n"));
    }

    #[test]
    fn test_keep_ours_and_delete_region() {
        let input = format!("top\n<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>> {LABEL}\nbottom\n");
        let r = resolver();
        assert_eq!(
            r.resolve_generic(&input, ResolutionPolicy::KeepOurs),
            "top\nours\nbottom\n"
        );
        assert_eq!(
            r.resolve_generic(&input, ResolutionPolicy::DeleteRegion),
            "top\nbottom\n"
        );
    }

    #[test]
    fn test_empty_theirs_removes_region() {
        let input = format!("a\n<<<<<<< HEAD\nonly ours\n=======\n>>>>>>> {LABEL}\nb\n");
        let out = resolver().resolve_generic(&input, ResolutionPolicy::KeepTheirs);
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn test_unterminated_end_marker_keeps_missing_newline() {
        let input = format!("<<<<<<< HEAD\na\n=======\nb\n>>>>>>> {LABEL}");
        let out = resolver().resolve_generic(&input, ResolutionPolicy::KeepTheirs);
        assert_eq!(out, "b");
    }

    #[test]
    fn test_diff3_region_keeps_theirs_only() {
        let input = format!(
            "<<<<<<< HEAD\nours\n||||||| base\nbase\n=======\ntheirs\n>>>>>>> {LABEL}\n"
        );
        let r = resolver();
        assert_eq!(r.resolve_generic(&input, ResolutionPolicy::KeepTheirs), "theirs\n");
        assert_eq!(r.resolve_generic(&input, ResolutionPolicy::KeepOurs), "ours\n");
    }

    #[test]
    fn test_malformed_region_left_untouched() {
        let input = format!("<<<<<<< HEAD\na\n=======\nb\n\nno end marker {LABEL}\n");
        let out = resolver().resolve_generic(&input, ResolutionPolicy::KeepTheirs);
        assert_eq!(out, input);
    }

    #[test]
    fn test_nested_start_fails_safe() {
        let input = format!(
            "<<<<<<< HEAD\nouter\n<<<<<<< HEAD\ninner\n=======\nx\n>>>>>>> {LABEL}\n=======\ny\n>>>>>>> {LABEL}\n"
        );
        let r = resolver();
        assert_eq!(r.resolve_generic(&input, ResolutionPolicy::KeepTheirs), input);
        assert_eq!(r.resolve_special_case(&input), input);
    }

    #[test]
    fn test_nested_input_is_idempotent() {
        let input = format!(
            "top\n<<<<<<< HEAD\nouter\n<<<<<<< HEAD\ninner\n=======\nx\n>>>>>>> {LABEL}\n=======\ny\n>>>>>>> {LABEL}\n\
             <<<<<<< HEAD\na\n=======\nb\n>>>>>>> {LABEL}\n"
        );
        let r = resolver();
        let once = r.resolve_content(&input, ResolutionPolicy::KeepTheirs);
        assert_eq!(once.generic_resolved, 1);
        let twice = r.resolve_content(&once.content, ResolutionPolicy::KeepTheirs);
        assert_eq!(twice.content, once.content);
        assert_eq!(twice.regions(), 0);
        assert!(once.content.ends_with(&format!(">>>>>>> {LABEL}\nb\n")));
    }

    #[test]
    fn test_idempotent() {
        let input = format!(
            "head\n<<<<<<< HEAD\n  const vi: typeof import('vitest').vi\n=======\n>>>>>>> {LABEL}\n\
             <<<<<<< HEAD\na\n=======\nb\n>>>>>>> {LABEL}\n\
             <<<<<<< HEAD\nc\n=======\nd\n>>>>>>> other\ntail\n"
        );
        let r = resolver();
        let once = both_passes(&r, &input);
        let twice = both_passes(&r, &once);
        assert_eq!(once, twice);
        assert_eq!(
            once,
            "head\nb\n<<<<<<< HEAD\nc\n=======\nd\n>>>>>>> other\ntail\n"
        );
    }

    #[test]
    fn test_from_config_uses_config_root() {
        let config = SweepConfig {
            root: PathBuf::from("/work/app"),
            ..SweepConfig::default()
        };
        let r = ConflictResolver::from_config(&config).unwrap();
        assert_eq!(r.root(), Path::new("/work/app"));
        assert_eq!(r.locate(Path::new("a.ts")), PathBuf::from("/work/app/a.ts"));
        assert_eq!(resolver().locate(Path::new("a.ts")), PathBuf::from("a.ts"));
    }

    #[test]
    fn test_custom_labels() {
        let markers = MarkerConfig {
            ours_label: "Updated upstream".into(),
            incoming_label: "Stashed changes".into(),
        };
        let r = ConflictResolver::new(markers, &[]).unwrap();
        let input = "<<<<<<< Updated upstream\na\n=======\nb\n>>>>>>> Stashed changes\n";
        assert_eq!(r.resolve_generic(input, ResolutionPolicy::KeepOurs), "a\n");
    }

    #[test]
    fn test_declaration_with_regex_metacharacters_is_literal() {
        let r = ConflictResolver::new(MarkerConfig::default(), &["let a = (b)*".to_string()])
            .unwrap();
        let hit = format!("<<<<<<< HEAD\n\tlet a = (b)*\n=======\n>>>>>>> {LABEL}\n");
        let miss = format!("<<<<<<< HEAD\nlet a = bbb\n=======\n>>>>>>> {LABEL}\n");
        assert_eq!(r.resolve_special_case(&hit), "");
        assert_eq!(r.resolve_special_case(&miss), miss);
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!(
            "keep-theirs".parse::<ResolutionPolicy>().unwrap(),
            ResolutionPolicy::KeepTheirs
        );
        assert_eq!("ours".parse::<ResolutionPolicy>().unwrap(), ResolutionPolicy::KeepOurs);
        assert_eq!(ResolutionPolicy::DeleteRegion.to_string(), "delete-region");
        assert!(matches!(
            "both".parse::<ResolutionPolicy>(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    // -- files ---------------------------------------------------------------

    #[test]
    fn test_resolve_file_rewrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.test.ts");
        fs::write(
            &path,
            format!("<<<<<<< HEAD\nconst x = 1\n=======\nconst x = 2\n>>>>>>> {LABEL}\n"),
        )
        .unwrap();

        let outcome = resolver().resolve_file(&path, ResolutionPolicy::KeepTheirs);
        assert_eq!(
            outcome,
            FileOutcome::Resolved {
                path: path.clone(),
                regions: 1
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "const x = 2\n");
    }

    #[test]
    fn test_resolve_file_without_markers_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.ts");
        fs::write(&path, "export {}\n").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let outcome = resolver().resolve_file(&path, ResolutionPolicy::KeepTheirs);
        assert_eq!(outcome, FileOutcome::NoConflictFound { path: path.clone() });
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_resolve_file_dry_run_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.ts");
        let original = format!("<<<<<<< HEAD\na\n=======\nb\n>>>>>>> {LABEL}\n");
        fs::write(&path, &original).unwrap();

        let outcome = resolver()
            .with_dry_run(true)
            .resolve_file(&path, ResolutionPolicy::KeepTheirs);
        assert!(matches!(outcome, FileOutcome::Resolved { regions: 1, .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_resolve_file_read_error_is_outcome() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let outcome = resolver().resolve_file(dir.path(), ResolutionPolicy::KeepTheirs);
        assert!(outcome.is_error());
        assert!(outcome.to_string().starts_with("Error processing "));
    }

    #[test]
    fn test_resolve_batch_skips_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("clean.ts"), "let a = 1\n").unwrap();

        let r = resolver().with_root(dir.path());
        let outcomes = r.resolve_batch(&["clean.ts", "missing.ts"], ResolutionPolicy::KeepTheirs);
        assert_eq!(
            outcomes,
            vec![FileOutcome::NoConflictFound {
                path: dir.path().join("clean.ts")
            }]
        );
    }

    #[test]
    fn test_resolve_batch_preserves_input_order_and_continues_after_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b.ts"),
            format!("<<<<<<< HEAD\n1\n=======\n2\n>>>>>>> {LABEL}\n"),
        )
        .unwrap();
        fs::create_dir(dir.path().join("dir.ts")).unwrap();
        fs::write(dir.path().join("a.ts"), "clean\n").unwrap();

        let r = resolver().with_root(dir.path());
        let outcomes = r.resolve_batch(&["b.ts", "dir.ts", "a.ts"], ResolutionPolicy::KeepTheirs);
        let labels: Vec<_> = outcomes.iter().map(FileOutcome::label).collect();
        assert_eq!(labels, vec!["resolved", "error", "no-conflict"]);
    }

    #[test]
    fn test_run_batch_report() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("x.ts"),
            format!("<<<<<<< HEAD\n1\n=======\n2\n>>>>>>> {LABEL}\n"),
        )
        .unwrap();
        let batch = BatchConfig {
            name: "adhoc".into(),
            policy: ResolutionPolicy::KeepOurs,
            paths: vec!["x.ts".into(), "y.ts".into()],
        };
        let report = resolver().with_root(dir.path()).run_batch(&batch);
        assert_eq!(report.name, "adhoc");
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.regions(), 1);
        assert_eq!(fs::read_to_string(dir.path().join("x.ts")).unwrap(), "1\n");
    }
}
