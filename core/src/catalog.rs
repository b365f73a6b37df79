//! The static table catalog for the Stack Exchange dump format.
//!
//! One entry per dump file, in enumeration order: badges, comments, posts,
//! votes, postlinks, users, tags. The catalog is constant data defined once
//! for the process lifetime; the loader iterates it in this order and fails
//! on any requested table it does not contain.
//!
//! Column sets mirror the export format. Attributes are sparse — a record
//! may carry any subset of its table's columns — but an attribute outside
//! this set is an error for that record.

use crate::types::ColumnType::{Boolean, DateTime, Integer, Text};
use crate::types::{ColumnDef, ColumnType, TableDef};

const fn col(name: &'static str, ty: ColumnType) -> ColumnDef {
    ColumnDef { name, ty }
}

const BADGES: &[ColumnDef] = &[
    col("Id", Integer),
    col("UserId", Integer),
    col("Class", Integer),
    col("Name", Text),
    col("Date", DateTime),
    col("TagBased", Boolean),
];

const COMMENTS: &[ColumnDef] = &[
    col("Id", Integer),
    col("PostId", Integer),
    col("Score", Integer),
    col("Text", Text),
    col("CreationDate", DateTime),
    col("UserId", Integer),
    col("UserDisplayName", Text),
];

const POSTS: &[ColumnDef] = &[
    col("Id", Integer),
    // 1: question, 2: answer
    col("PostTypeId", Integer),
    // only present on answers
    col("ParentId", Integer),
    // only present on questions
    col("AcceptedAnswerId", Integer),
    col("CreationDate", DateTime),
    col("Score", Integer),
    col("ViewCount", Integer),
    col("Body", Text),
    // absent when the owner account was deleted
    col("OwnerUserId", Integer),
    col("OwnerDisplayName", Text),
    col("LastEditorUserId", Integer),
    col("LastEditorDisplayName", Text),
    col("LastEditDate", DateTime),
    col("LastActivityDate", DateTime),
    col("CommunityOwnedDate", DateTime),
    col("Title", Text),
    col("Tags", Text),
    col("AnswerCount", Integer),
    col("CommentCount", Integer),
    col("FavoriteCount", Integer),
    col("ClosedDate", DateTime),
];

const VOTES: &[ColumnDef] = &[
    col("Id", Integer),
    col("PostId", Integer),
    col("UserId", Integer),
    col("VoteTypeId", Integer),
    col("CreationDate", DateTime),
    // only present on bounty votes
    col("BountyAmount", Integer),
];

const POSTLINKS: &[ColumnDef] = &[
    col("Id", Integer),
    col("CreationDate", DateTime),
    col("PostId", Integer),
    col("RelatedPostId", Integer),
    col("PostLinkTypeId", Integer),
    col("LinkTypeId", Integer),
];

const USERS: &[ColumnDef] = &[
    col("Id", Integer),
    col("Reputation", Integer),
    col("CreationDate", DateTime),
    col("DisplayName", Text),
    col("LastAccessDate", DateTime),
    col("WebsiteUrl", Text),
    col("Location", Text),
    col("Age", Integer),
    col("AboutMe", Text),
    col("Views", Integer),
    col("UpVotes", Integer),
    col("DownVotes", Integer),
    col("AccountId", Integer),
    col("ProfileImageUrl", Text),
];

const TAGS: &[ColumnDef] = &[
    col("Id", Integer),
    col("TagName", Text),
    col("Count", Integer),
    col("ExcerptPostId", Integer),
    col("WikiPostId", Integer),
];

/// All catalog tables in enumeration (and processing) order.
pub const TABLES: &[TableDef] = &[
    TableDef {
        name: "badges",
        file_stem: "Badges",
        columns: BADGES,
    },
    TableDef {
        name: "comments",
        file_stem: "Comments",
        columns: COMMENTS,
    },
    TableDef {
        name: "posts",
        file_stem: "Posts",
        columns: POSTS,
    },
    TableDef {
        name: "votes",
        file_stem: "Votes",
        columns: VOTES,
    },
    TableDef {
        name: "postlinks",
        file_stem: "PostLinks",
        columns: POSTLINKS,
    },
    TableDef {
        name: "users",
        file_stem: "Users",
        columns: USERS,
    },
    TableDef {
        name: "tags",
        file_stem: "Tags",
        columns: TAGS,
    },
];

/// Looks up a table definition by its lowercase name.
///
/// # Examples
///
/// ```
/// use sedump_core::catalog;
///
/// assert!(catalog::table("votes").is_some());
/// assert!(catalog::table("Votes").is_none());
/// assert!(catalog::table("posthistory").is_none());
/// ```
pub fn table(name: &str) -> Option<&'static TableDef> {
    TABLES.iter().find(|t| t.name == name)
}
