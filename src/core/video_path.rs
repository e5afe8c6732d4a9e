use std::path::{Component, Path, PathBuf};

/// Raised while resolving a stored video reference to a file on disk. The
/// variants never carry the resolved path, so nothing about the filesystem
/// layout can leak into a response body.
#[derive(Debug, thiserror::Error)]
pub enum VideoPathError {
    #[error("video file not found")]
    NotFound,
    #[error("video path escapes the configured video directory")]
    OutsideRoot,
}

/// Extract the bare file name from a stored video reference. References come
/// in three shapes: a full URL, a relative upload path like
/// `/uploads/videos/clip.mp4`, or a plain file name.
pub fn extract_file_name(video_ref: &str) -> &str {
    match video_ref.rfind('/') {
        Some(idx) => &video_ref[idx + 1..],
        None => video_ref,
    }
}

/// Neutralize traversal sequences while keeping the file extension intact.
/// Any character outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let mut name = file_name.to_string();

    if name.contains("..") || name.contains('/') || name.contains('\\') {
        if let Some(last) = Path::new(&name).file_name().and_then(|n| n.to_str()) {
            name = last.to_string();
        }
    }

    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Turn a stored video reference into an absolute path confined to
/// `video_root`. The candidate must be an existing regular file, and its
/// normalized form must stay under the normalized root.
pub fn resolve_video_path(video_ref: &str, video_root: &Path) -> Result<PathBuf, VideoPathError> {
    let file_name = sanitize_file_name(extract_file_name(video_ref));
    let candidate = video_root.join(&file_name);

    if !candidate.is_file() {
        return Err(VideoPathError::NotFound);
    }

    let normalized_file = normalize_absolute(&candidate);
    let normalized_root = normalize_absolute(video_root);
    if !normalized_file.starts_with(&normalized_root) {
        return Err(VideoPathError::OutsideRoot);
    }

    Ok(candidate)
}

// Lexical normalization only: `..` and `.` components are folded away without
// touching the filesystem, mirroring how the candidate was constructed.
fn normalize_absolute(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok};
    use quickcheck_macros::quickcheck;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn plain_file_names_pass_through_unchanged() {
        for name in ["clip.mp4", "intro_01.webm", "old-cut.v2.mkv", "A9.z"] {
            assert_eq!(sanitize_file_name(name), name);
        }
    }

    #[test]
    fn traversal_sequences_are_reduced_to_the_final_segment() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("..\\..\\windows\\system.ini"), "system.ini");
        assert_eq!(sanitize_file_name("videos/clip.mp4"), "clip.mp4");
    }

    #[test]
    fn unexpected_characters_become_underscores() {
        assert_eq!(sanitize_file_name("my movie (1).mp4"), "my_movie__1_.mp4");
        assert_eq!(sanitize_file_name("clip;rm -rf.mp4"), "clip_rm_-rf.mp4");
    }

    #[quickcheck]
    fn sanitizing_twice_equals_sanitizing_once(input: String) -> bool {
        let once = sanitize_file_name(&input);
        sanitize_file_name(&once) == once
    }

    #[test]
    fn file_name_extraction_handles_all_reference_shapes() {
        assert_eq!(
            extract_file_name("http://cdn.example.com/videos/clip.mp4"),
            "clip.mp4"
        );
        assert_eq!(extract_file_name("/uploads/videos/clip.mp4"), "clip.mp4");
        assert_eq!(extract_file_name("clip.mp4"), "clip.mp4");
    }

    #[test]
    fn resolves_references_inside_the_root() {
        let root = tempfile::tempdir().unwrap();
        let mut file = File::create(root.path().join("clip.mp4")).unwrap();
        file.write_all(b"data").unwrap();

        for video_ref in [
            "clip.mp4",
            "/uploads/videos/clip.mp4",
            "https://cdn.example.com/media/clip.mp4",
        ] {
            let resolved = resolve_video_path(video_ref, root.path());
            assert_ok!(&resolved);
            assert!(resolved.unwrap().ends_with("clip.mp4"));
        }
    }

    #[test]
    fn traversal_references_never_escape_the_root() {
        let root = tempfile::tempdir().unwrap();
        File::create(root.path().join("clip.mp4")).unwrap();

        // The sanitized candidate lands inside the root where no such file
        // exists, so the attempt surfaces as a plain not-found.
        assert_err!(resolve_video_path("../../etc/passwd", root.path()));
        assert_err!(resolve_video_path("..", root.path()));
        assert_err!(resolve_video_path("videos/../secret.mp4", root.path()));
    }

    #[test]
    fn missing_files_are_not_found() {
        let root = tempfile::tempdir().unwrap();
        assert_err!(resolve_video_path("absent.mp4", root.path()));
    }
}
