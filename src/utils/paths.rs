use std::env::current_dir;
use std::io;
use std::path::{absolute, Component, Path, PathBuf};

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let p = path.as_ref();
    if let Some(stripped) = p.strip_prefix("~").ok() {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(stripped);
        }
    }
    p.to_path_buf()
}

/// lexical only, symlinks are not resolved and the path does not need to exist
pub fn canonicalize<P: AsRef<Path>>(relative_path: P) -> io::Result<PathBuf> {
    let mut abs_path = current_dir()?;
    let relative_path = relative_path.as_ref();

    if relative_path.has_root() {
        return Ok(relative_path.to_path_buf());
    }

    for component in relative_path.components() {
        match component {
            Component::ParentDir => {
                abs_path.pop();
            }
            Component::RootDir => unreachable!(),
            Component::CurDir => continue,
            Component::Normal(c) => {
                abs_path.push(c);
            }
            Component::Prefix(prefix) => {
                abs_path.push(prefix.as_os_str());
            }
        };
    }

    Ok(abs_path)
}

pub fn get_absolute_path<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    Ok(absolute(canonicalize(expand_tilde(path))?)?)
}

/// wire paths always use "/" no matter the host separator
pub fn to_forward_slashes<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// path of `target` as seen from `base`, both expected to be absolute.
/// paths without a common root (e.g. different drives) come back unchanged.
pub fn relative_path<B: AsRef<Path>, T: AsRef<Path>>(base: B, target: T) -> PathBuf {
    let base: Vec<Component> = base
        .as_ref()
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let target: Vec<Component> = target
        .as_ref()
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(b, t)| b == t)
        .count();

    if common == 0 {
        return target.iter().collect();
    }

    let mut rel_path = PathBuf::new();
    for _ in common..base.len() {
        rel_path.push(Component::ParentDir);
    }
    for component in &target[common..] {
        rel_path.push(component);
    }

    if rel_path.as_os_str().is_empty() {
        rel_path.push(Component::CurDir);
    }

    rel_path
}

/// joins a client supplied path under `root`. leading separators are ignored, any
/// `..`, drive prefix or other escaping component makes it `None`.
pub fn join_within<P: AsRef<Path>>(root: P, untrusted: &str) -> Option<PathBuf> {
    let untrusted = untrusted.trim_start_matches(['/', '\\']);

    let mut joined = root.as_ref().to_path_buf();
    for component in Path::new(untrusted).components() {
        match component {
            Component::Normal(c) => joined.push(c),
            Component::CurDir => continue,
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    // "a\..\b" is a single component on unix but climbs on windows
    if untrusted.split(['/', '\\']).any(|seg| seg == "..") {
        return None;
    }

    Some(joined)
}

/// `root/name` when `name` is exactly one plain path segment, so it can never
/// collapse onto `root` itself or reach below a nested directory
pub fn join_segment<P: AsRef<Path>>(root: P, name: &str) -> Option<PathBuf> {
    if name.contains(['/', '\\']) {
        return None;
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(segment)), None) => Some(root.as_ref().join(segment)),
        _ => None,
    }
}

/// both paths are resolved on disk, so symlinks pointing outside `root` are caught
pub fn is_within<R: AsRef<Path>, P: AsRef<Path>>(root: R, path: P) -> bool {
    let root = match root.as_ref().canonicalize() {
        Ok(root) => root,
        Err(_) => return false,
    };

    match path.as_ref().canonicalize() {
        Ok(path) => path.starts_with(root),
        Err(_) => false,
    }
}
