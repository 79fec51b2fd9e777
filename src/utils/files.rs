use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    constants,
    shared_types::{FileDetail, FileEntry},
    utils::paths,
};

pub fn is_markdown_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => constants::MARKDOWN_FILE_EXTS
            .iter()
            .any(|md_ext| ext.eq_ignore_ascii_case(md_ext)),
        None => false,
    }
}

/// "my-first-post" -> "MY FIRST POST". the editor derives its own title from the
/// front matter, this one is only a fallback label.
pub fn derive_title(name: &str) -> String {
    name.replace('-', " ").to_uppercase()
}

/// every `.md`/`.mdx` file below `root`, in walk order. an unreadable tree lists as
/// empty, a single unreadable file is skipped.
pub fn list_markdown_files(root: &Path) -> Vec<FileEntry> {
    if root.as_os_str().is_empty() || !root.is_dir() {
        return vec![];
    }

    let dir_entries = match WalkDir::new(root).into_iter().collect::<Result<Vec<_>, _>>() {
        Ok(dir_entries) => dir_entries,
        Err(err) => {
            warn!("could not enumerate {}: {}", root.display(), err);
            return vec![];
        }
    };

    dir_entries
        .iter()
        .map(|dir_entry| dir_entry.path())
        .filter(|path| path.is_file() && is_markdown_file(path))
        .filter_map(|path| match build_file_entry(path, root) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("skipping {}: {}", path.display(), err);
                None
            }
        })
        .collect()
}

/// `relative_path` is computed against `base`
pub fn build_file_entry(full_path: &Path, base: &Path) -> io::Result<FileEntry> {
    let metadata = fs::metadata(full_path)?;

    let updated_at: DateTime<Utc> = metadata.modified()?.into();
    // not every filesystem records a birth time
    let created_at: DateTime<Utc> = match metadata.created() {
        Ok(created) => created.into(),
        Err(_) => updated_at,
    };

    let relative_path = match full_path.strip_prefix(base) {
        Ok(rel_path) => rel_path.to_path_buf(),
        Err(_) => paths::relative_path(base, full_path),
    };

    let file_name = full_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = full_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = full_path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    Ok(FileEntry {
        full_path: full_path.to_string_lossy().to_string(),
        relative_path: paths::to_forward_slashes(relative_path),
        title: derive_title(&name),
        file_name,
        name,
        extension,
        created_at,
        updated_at,
    })
}

pub fn read_file_detail(full_path: &Path, base: &Path) -> io::Result<FileDetail> {
    let entry = build_file_entry(full_path, base)?;
    let content = fs::read_to_string(full_path)?;

    Ok(FileDetail { entry, content })
}

/// front matter header followed by the raw markdown
pub fn compose_post(title: &str, author: &str, content: &str) -> String {
    format!("---\ntitle: {title}\nauthors: {author}\n---\n{content}")
}

/// `<blog root>/<file name>.md`, `None` when the name would leave the blog root
pub fn get_post_path(blog_root: &Path, file_name: &str) -> Option<PathBuf> {
    paths::join_within(
        blog_root,
        &format!("{}.{}", file_name, constants::POST_FILE_EXT),
    )
}

/// `<assets root>/img/blog/<blog file name>`, `None` unless the blog file name is a
/// single path segment
pub fn get_asset_dir(assets_root: &Path, blog_file_name: &str) -> Option<PathBuf> {
    let mut asset_dir = assets_root.to_path_buf();
    for subdir in constants::ASSET_SUBDIRS {
        asset_dir.push(subdir);
    }

    paths::join_segment(asset_dir, blog_file_name)
}

/// full replace, the previous contents are discarded
pub fn write_post(post_path: &Path, contents: &str) -> io::Result<()> {
    fs::write(post_path, contents)
}

pub fn delete_post(post_path: &Path) -> io::Result<()> {
    fs::remove_file(post_path)
}

/// creates the asset directory when missing, overwrites an existing asset
pub fn write_asset(asset_dir: &Path, file_name: &str, data: &[u8]) -> io::Result<PathBuf> {
    fs::DirBuilder::new().recursive(true).create(asset_dir)?;

    let asset_path = paths::join_segment(asset_dir, file_name).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid asset file name: {}", file_name),
        )
    })?;
    fs::write(&asset_path, data)?;

    Ok(asset_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_markdown_extensions() {
        assert!(is_markdown_file(Path::new("a.md")));
        assert!(is_markdown_file(Path::new("a.MDX")));
        assert!(is_markdown_file(Path::new("dir/a.Md")));
        assert!(!is_markdown_file(Path::new("a.txt")));
        assert!(!is_markdown_file(Path::new("md")));
    }

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title("2024-01-02-hello-world"), "2024 01 02 HELLO WORLD");
        assert_eq!(derive_title("plain"), "PLAIN");
    }

    #[test]
    fn test_compose_post() {
        assert_eq!(
            compose_post("Hi", "Bob", "Body"),
            "---\ntitle: Hi\nauthors: Bob\n---\nBody"
        );
    }

    #[test]
    fn test_list_empty_and_missing_roots() {
        let temp = TempDir::new().unwrap();

        assert!(list_markdown_files(temp.path()).is_empty());
        assert!(list_markdown_files(&temp.path().join("missing")).is_empty());
        assert!(list_markdown_files(Path::new("")).is_empty());
    }

    #[test]
    fn test_list_filters_and_normalizes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(&root.join("hello-world.md"), "a");
        write(&root.join("drafts").join("2024").join("deep.MDX"), "b");
        write(&root.join("notes.txt"), "c");
        write(&root.join("img").join("cat.png"), "d");

        let mut entries = list_markdown_files(root);
        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        assert_eq!(entries.len(), 2);

        let deep = &entries[0];
        assert_eq!(deep.relative_path, "drafts/2024/deep.MDX");
        assert_eq!(deep.file_name, "deep.MDX");
        assert_eq!(deep.name, "deep");
        assert_eq!(deep.extension, ".MDX");

        let hello = &entries[1];
        assert_eq!(hello.relative_path, "hello-world.md");
        assert_eq!(hello.title, "HELLO WORLD");
        assert_eq!(hello.extension, ".md");
        assert!(hello.updated_at <= Utc::now());

        for entry in &entries {
            assert!(!entry.relative_path.contains('\\'));
        }
    }

    #[test]
    fn test_read_file_detail_relative_to_base() {
        let temp = TempDir::new().unwrap();
        let post = temp.path().join("blog").join("post.md");
        write(&post, "content");

        let detail = read_file_detail(&post, temp.path()).unwrap();

        assert_eq!(detail.entry.relative_path, "blog/post.md");
        assert_eq!(detail.content, "content");
    }

    #[test]
    fn test_post_path_stays_in_root() {
        let root = Path::new("/srv/blog");

        assert_eq!(
            get_post_path(root, "hello"),
            Some(PathBuf::from("/srv/blog/hello.md"))
        );
        assert_eq!(get_post_path(root, "../escape"), None);
    }

    #[test]
    fn test_asset_dir_layout() {
        let root = Path::new("/srv/assets");

        assert_eq!(
            get_asset_dir(root, "hello"),
            Some(PathBuf::from("/srv/assets/img/blog/hello"))
        );
        assert_eq!(get_asset_dir(root, "../../x"), None);
        assert_eq!(get_asset_dir(root, "."), None);
        assert_eq!(get_asset_dir(root, "drafts/hello"), None);
    }

    #[test]
    fn test_write_asset_creates_dirs_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let asset_dir = temp.path().join("img").join("blog").join("hello");

        write_asset(&asset_dir, "cat.png", b"first").unwrap();
        let asset_path = write_asset(&asset_dir, "cat.png", b"second").unwrap();

        assert_eq!(asset_path, asset_dir.join("cat.png"));
        assert_eq!(fs::read(asset_path).unwrap(), b"second");
    }

    #[test]
    fn test_write_then_delete_post() {
        let temp = TempDir::new().unwrap();
        let post_path = get_post_path(temp.path(), "hello").unwrap();

        write_post(&post_path, "old contents that are longer").unwrap();
        write_post(&post_path, "new").unwrap();
        assert_eq!(fs::read_to_string(&post_path).unwrap(), "new");

        delete_post(&post_path).unwrap();
        assert!(!post_path.exists());
        assert!(delete_post(&post_path).is_err());
    }
}
