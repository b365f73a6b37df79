//! Integration tests for the sedump-import binary.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Output;

use rusqlite::Connection;

fn run(data_dir: &Path, args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_sedump-import"))
        .args(args)
        .args(["--data-dir", data_dir.to_str().unwrap()])
        .output()
        .expect("failed to run sedump-import")
}

/// Writes a small but complete set of dump files into the directory.
fn write_fixtures(dir: &Path) {
    let files: &[(&str, &str)] = &[
        (
            "Badges.xml",
            r#"<badges>
  <row Id="1" UserId="10" Class="3" Name="Autobiographer" Date="2010-07-19T19:50:26.270" TagBased="FALSE"/>
  <row Id="2" UserId="10" Class="3" Name="research-assistant" TagBased="TRUE"/>
</badges>"#,
        ),
        (
            "Comments.xml",
            r#"<comments>
  <row Id="1" PostId="1" Score="4" Text="Could you add a traceback?" CreationDate="2010-07-19T19:55:00.000" UserId="11"/>
  <row Id="2" PostId="2" Score="0" Text="This fixed it, thanks" UserId="10"/>
</comments>"#,
        ),
        (
            "Posts.xml",
            r#"<posts>
  <row Id="1" PostTypeId="1" AcceptedAnswerId="2" CreationDate="2010-07-19T19:12:12.510" Score="15" ViewCount="1033" Body="&lt;p&gt;How do I stream large XML files?&lt;/p&gt;" OwnerUserId="10" Title="Streaming large XML files" Tags="&lt;xml&gt;&lt;streaming&gt;" AnswerCount="1" CommentCount="1"/>
  <row Id="2" PostTypeId="2" ParentId="1" CreationDate="2010-07-19T19:30:00.000" Score="22" Body="&lt;p&gt;Use a pull parser.&lt;/p&gt;" OwnerUserId="11" CommentCount="1"/>
</posts>"#,
        ),
        (
            "Votes.xml",
            r#"<votes>
  <row Id="1" PostId="1" VoteTypeId="2" CreationDate="2010-07-19T00:00:00.000"/>
  <row Id="2" PostId="1" VoteTypeId="8" BountyAmount="" CreationDate="2010-07-20T00:00:00.000"/>
  <row Id="3" PostId="2" VoteTypeId="2" CreationDate="2010-07-20T00:00:00.000"/>
</votes>"#,
        ),
        (
            "PostLinks.xml",
            r#"<postlinks>
  <row Id="1" CreationDate="2010-07-21T00:00:00.000" PostId="1" RelatedPostId="2" LinkTypeId="1"/>
</postlinks>"#,
        ),
        (
            "Users.xml",
            r#"<users>
  <row Id="10" Reputation="101" CreationDate="2010-07-19T00:00:00.000" DisplayName="ada" UpVotes="3" DownVotes="0"/>
  <row Id="11" Reputation="2864" CreationDate="2010-07-19T00:00:00.000" DisplayName="brian" Location="Earth"/>
</users>"#,
        ),
        (
            "Tags.xml",
            r#"<tags>
  <row Id="1" TagName="xml" Count="42"/>
  <row Id="2" TagName="streaming" Count="7"/>
</tags>"#,
        ),
    ];
    for (name, contents) in files {
        fs::write(dir.join(name), contents).expect("failed to write fixture");
    }
}

// ---------------------------------------------------------------------------
// import
// ---------------------------------------------------------------------------

#[test]
fn import_builds_database_search_and_indices() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let output = run(dir.path(), &["import"]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Creating table posts"));
    assert!(stdout.contains("Creating indices..."));
    // The empty-BountyAmount vote is skipped, its siblings survive.
    assert!(stdout.contains("votes: 2 inserted, 1 skipped"));

    let conn = Connection::open(dir.path().join("so-dump.db")).unwrap();
    let posts: i64 = conn
        .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))
        .unwrap();
    assert_eq!(posts, 2);

    // Only the question entered the search index; porter stems "streaming".
    let hits: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM posts_search WHERE posts_search MATCH 'stream'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(hits, 1);

    let indices: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='index' \
             AND name IN ('post_ids', 'comments_postid', 'parent_ids')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(indices, 3);
}

#[test]
fn second_full_import_fails_on_existing_search_structure() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    assert!(run(dir.path(), &["import"]).status.success());

    let output = run(dir.path(), &["import"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr was: {stderr}");
}

#[test]
fn import_subset_can_rerun_with_skip_indices() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let args = ["import", "--tables", "badges,tags", "--skip-indices"];
    assert!(run(dir.path(), &args).status.success());
    assert!(run(dir.path(), &args).status.success());

    let conn = Connection::open(dir.path().join("so-dump.db")).unwrap();
    let badges: i64 = conn
        .query_row("SELECT COUNT(*) FROM badges", [], |row| row.get(0))
        .unwrap();
    assert_eq!(badges, 4);
}

#[test]
fn unknown_table_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["import", "--tables", "posthistory"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown table 'posthistory'"));
}

#[test]
fn missing_dump_file_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["import", "--tables", "badges"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Badges.xml"), "stderr was: {stderr}");
}

#[test]
fn gzipped_dump_files_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let xml = r#"<tags><row Id="1" TagName="compression"/></tags>"#;
    let file = fs::File::create(dir.path().join("Tags.xml.gz")).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder.write_all(xml.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let output = run(dir.path(), &["import", "--tables", "tags", "--skip-indices"]);
    assert!(output.status.success(), "{output:?}");

    let conn = Connection::open(dir.path().join("so-dump.db")).unwrap();
    let name: String = conn
        .query_row("SELECT TagName FROM tags", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "compression");
}

#[test]
fn import_writes_the_statement_log_into_the_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    assert!(
        run(dir.path(), &["import", "--tables", "badges", "--skip-indices"])
            .status
            .success()
    );

    let log = fs::read_to_string(dir.path().join("so-import.log")).unwrap();
    assert!(log.contains("CREATE TABLE IF NOT EXISTS badges"), "log was: {log}");
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

#[test]
fn status_reports_counts_as_json() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    assert!(run(dir.path(), &["import"]).status.success());

    let output = run(dir.path(), &["status", "--format", "json"]);
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["search_index"], serde_json::Value::Bool(true));
    let posts = status["tables"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "posts")
        .unwrap();
    assert_eq!(posts["rows"], serde_json::json!(2));
}

#[test]
fn status_on_an_empty_database_lists_absent_tables() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["status"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("badges: absent"));
    assert!(stdout.contains("posts search index: no"));
}
