use crate::config::RunMode;
use crate::error::{FileError, SkipReason};
use crate::planner::RenamePlan;
use crate::sidecar::rewrite_companion;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
pub enum FileOutcome {
    Skipped(SkipReason),
    Previewed(RenamePlan),
    Renamed(RenamePlan),
    Failed {
        path: PathBuf,
        #[serde(serialize_with = "serialize_error")]
        error: FileError,
    },
}

fn serialize_error<S: serde::Serializer>(error: &FileError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// Source -> target pairs in the order they are (or would be) moved.
pub fn rename_pairs(plan: &RenamePlan) -> Vec<(&Path, &Path)> {
    let mut pairs = vec![(plan.source.as_path(), plan.target.as_path())];
    if let (Some(from), Some(to)) = (&plan.companion_source, &plan.companion_target) {
        pairs.push((from.as_path(), to.as_path()));
    }
    pairs
}

pub fn execute(plan: RenamePlan, mode: RunMode) -> Result<FileOutcome, FileError> {
    match mode {
        RunMode::Preview => Ok(FileOutcome::Previewed(plan)),
        RunMode::Apply => {
            apply_plan(&plan)?;
            Ok(FileOutcome::Renamed(plan))
        }
    }
}

fn apply_plan(plan: &RenamePlan) -> Result<(), FileError> {
    // Checked up front so a blocked companion never leaves the photo renamed without it.
    if let Some(companion_target) = &plan.companion_target {
        ensure_vacant(companion_target)?;
    }
    rename_no_clobber(&plan.source, &plan.target)?;
    info!(
        from = %plan.source.display(),
        to = %plan.target.display(),
        "renamed photo"
    );

    if let (Some(from), Some(to)) = (&plan.companion_source, &plan.companion_target) {
        rewrite_companion(from, to, &plan.source_name(), &plan.target_name())?;
        info!(from = %from.display(), to = %to.display(), "moved companion");
    }
    Ok(())
}

fn ensure_vacant(target: &Path) -> Result<(), FileError> {
    match fs::symlink_metadata(target) {
        Ok(_) => Err(FileError::RenameCollision(target.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(FileError::io(
            format!("could not inspect rename target {}", target.display()),
            err,
        )),
    }
}

fn rename_no_clobber(from: &Path, to: &Path) -> Result<(), FileError> {
    ensure_vacant(to)?;
    fs::rename(from, to).map_err(|err| {
        FileError::io(
            format!("rename failed: {} -> {}", from.display(), to.display()),
            err,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{execute, rename_pairs, FileOutcome};
    use crate::config::RunMode;
    use crate::error::FileError;
    use crate::planner::RenamePlan;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn plan_in(dir: &Path, with_companion: bool) -> RenamePlan {
        RenamePlan {
            source: dir.join("img_0001.cr2"),
            target: dir.join("20220704_img_0001.cr2"),
            companion_source: with_companion.then(|| dir.join("img_0001.XMP")),
            companion_target: with_companion.then(|| dir.join("20220704_img_0001.xmp")),
        }
    }

    #[test]
    fn preview_lists_primary_then_companion_and_touches_nothing() {
        let temp = tempdir().expect("tempdir");
        let plan = plan_in(temp.path(), true);
        fs::write(&plan.source, b"raw").expect("write photo");

        let pairs: Vec<_> = rename_pairs(&plan)
            .into_iter()
            .map(|(from, to)| (from.to_path_buf(), to.to_path_buf()))
            .collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].1, temp.path().join("20220704_img_0001.cr2"));
        assert_eq!(pairs[1].0, temp.path().join("img_0001.XMP"));

        let outcome = execute(plan.clone(), RunMode::Preview).expect("preview never fails");
        assert!(matches!(outcome, FileOutcome::Previewed(ref p) if *p == plan));
        assert!(plan.source.exists());
        assert!(!plan.target.exists());
    }

    #[test]
    fn apply_moves_photo_and_rewrites_companion() {
        let temp = tempdir().expect("tempdir");
        let plan = plan_in(temp.path(), true);
        fs::write(&plan.source, b"raw").expect("write photo");
        fs::write(
            plan.companion_source.as_ref().expect("companion"),
            "<rdf:Description crs:RawFileName=\"img_0001.cr2\"/>",
        )
        .expect("write companion");

        let outcome = execute(plan.clone(), RunMode::Apply).expect("apply");
        assert!(matches!(outcome, FileOutcome::Renamed(_)));
        assert!(!plan.source.exists());
        assert_eq!(fs::read(&plan.target).expect("moved photo"), b"raw");
        assert!(!temp.path().join("img_0001.XMP").exists());
        let xmp = fs::read_to_string(temp.path().join("20220704_img_0001.xmp")).expect("xmp");
        assert_eq!(
            xmp,
            "<rdf:Description crs:RawFileName=\"20220704_img_0001.cr2\"/>"
        );
    }

    #[test]
    fn collision_leaves_photo_and_companion_untouched() {
        let temp = tempdir().expect("tempdir");
        let plan = plan_in(temp.path(), true);
        let companion = plan.companion_source.clone().expect("companion");
        fs::write(&plan.source, b"new shot").expect("write photo");
        fs::write(&plan.target, b"older shot").expect("write blocker");
        fs::write(&companion, "img_0001.cr2").expect("write companion");

        let err = execute(plan.clone(), RunMode::Apply).expect_err("collision");
        assert!(matches!(err, FileError::RenameCollision(ref p) if *p == plan.target));
        assert_eq!(fs::read(&plan.source).expect("source"), b"new shot");
        assert_eq!(fs::read(&plan.target).expect("target"), b"older shot");
        assert_eq!(fs::read_to_string(&companion).expect("companion"), "img_0001.cr2");
        assert!(!temp.path().join("20220704_img_0001.xmp").exists());
    }

    #[test]
    fn failed_primary_rename_leaves_companion_alone() {
        let temp = tempdir().expect("tempdir");
        let plan = plan_in(temp.path(), true);
        let companion = plan.companion_source.clone().expect("companion");
        fs::write(&companion, "img_0001.cr2").expect("write companion");

        let err = execute(plan, RunMode::Apply).expect_err("source is missing");
        assert!(matches!(err, FileError::Io { .. }));
        assert!(companion.exists());
    }

    #[test]
    fn blocked_companion_target_stops_before_the_photo_moves() {
        let temp = tempdir().expect("tempdir");
        let plan = plan_in(temp.path(), true);
        let companion = plan.companion_source.clone().expect("companion");
        let companion_target = plan.companion_target.clone().expect("companion target");
        fs::write(&plan.source, b"raw").expect("write photo");
        fs::write(&companion, "img_0001.cr2").expect("write companion");
        fs::write(&companion_target, "unrelated sidecar").expect("write blocker");

        let err = execute(plan.clone(), RunMode::Apply).expect_err("companion collision");
        assert!(matches!(err, FileError::RenameCollision(ref p) if *p == companion_target));
        assert_eq!(fs::read(&plan.source).expect("photo stays"), b"raw");
        assert!(!plan.target.exists());
        assert_eq!(fs::read_to_string(&companion).expect("companion"), "img_0001.cr2");
        assert_eq!(
            fs::read_to_string(&companion_target).expect("blocker"),
            "unrelated sidecar"
        );
    }
}
