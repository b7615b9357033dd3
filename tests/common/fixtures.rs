use std::path::PathBuf;

/// 64-character hash made of one repeated hex digit.
pub fn hash(c: char) -> String {
    std::iter::repeat(c).take(64).collect()
}

/// Zero-padded hash for numbered fixtures.
pub fn numbered_hash(n: u64) -> String {
    format!("{:064x}", n)
}

/// Two declared screens (Login, Home) and one click between them.
pub fn login_home_trace() -> String {
    format!(
        "Transitions (1):\n\
         {c}: (s:{a}, t:{b}): act=(1) click, cp=[ty=Button,idx=login_btn,tx=Login,dsc=] weight=0.5\n\
         States (2):\n\
         {a}, Login, activity=.MainActivity\n  \
         Welcome screen with a login form,\n  \
         spanning two lines\n\
         {b}, Home, activity=.HomeActivity\n",
        a = hash('a'),
        b = hash('b'),
        c = hash('c'),
    )
}

/// Write `content` to a per-test file under the system temp dir.
pub fn write_trace(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("screen_graph_tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
