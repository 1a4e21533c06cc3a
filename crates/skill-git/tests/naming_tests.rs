use rstest::rstest;
use skill_git::repo_folder_name;

#[rstest]
#[case("https://github.com/acme/skills", "skills")]
#[case("https://github.com/acme/skills.git", "skills")]
#[case("https://github.com/acme/skills/", "skills")]
#[case("https://github.com/acme/skills.git/", "skills")]
#[case("git@github.com:acme/agent-skills.git", "agent-skills")]
#[case("ssh://git@example.com:2222/team/tools.git", "tools")]
#[case("file:///srv/git/library.git", "library")]
#[case("/srv/git/library", "library")]
#[case("../relative/repo", "repo")]
#[case("C:\\repos\\windows-skills", "windows-skills")]
#[case("  https://github.com/acme/padded  ", "padded")]
#[case("plain", "plain")]
fn test_folder_name(#[case] repo: &str, #[case] expected: &str) {
    assert_eq!(repo_folder_name(repo), expected);
}

#[rstest]
#[case("")]
#[case("/")]
#[case(".git")]
#[case("git@github.com:")]
fn test_folder_name_underivable(#[case] repo: &str) {
    assert_eq!(repo_folder_name(repo), "");
}

#[test]
fn test_same_name_different_hosts() {
    // Distinct identifiers can still collide locally
    assert_eq!(
        repo_folder_name("https://github.com/a/skills"),
        repo_folder_name("https://gitlab.com/b/skills.git")
    );
}
