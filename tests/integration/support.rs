use std::fs;
use std::path::Path;

/// Write `files` (relative path, contents) under `root`, creating directories.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

/// Index file of the `skills` folder in [`portfolio`]
pub const SKILLS_INDEX: &str = "---metadata---\ntitle: Skill Index\n---end---\n[h1]Skills[/h1]\n";

/// A small portfolio: two loose files, one folder with an index file.
pub fn portfolio(root: &Path) {
    write_tree(
        root,
        &[
            (
                "about.txt",
                "---metadata---\ntitle: About Me\n---end---\n[title]Hello[/title]\n[p]I build [strong]things[/strong].[/p]\n",
            ),
            ("skills/skills.txt", SKILLS_INDEX),
            ("skills/skills_consulting.txt", "[p]Consulting[/p]\n"),
            ("skills/skills_development.txt", "[p]Development[/p]\n"),
            ("skills/skills_business.txt", "plain text, no tags\n"),
            ("contact.txt", "---metadata---\ntileX: 3\ntileY: 2\n---end---\n[p]Say hello[/p]\n[link url=\"mailto:me@example.com\"]Mail[/link]\n"),
            ("notes.md", "ignored: wrong extension\n"),
        ],
    );
}
