//! Pattern passes over generated HTML
//!
//! Each pass is a plain `fn(&str, &mut Mapper) -> (String, usize)`; the
//! [`Redactor`] runs them in a fixed order, feeding each pass the previous
//! pass's output.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::generator::NameStyle;
use crate::mapping::{Category, Mapper};

lazy_static! {
    static ref WORKSPACE_ID: Regex = Regex::new(r"team=(T[A-Z0-9]{8,10})").unwrap();
    static ref USER_LINK: Regex = Regex::new(r"user\?team=([^&]+)&id=(U[A-Z0-9]+)").unwrap();
    static ref CHANNEL_LINK: Regex = Regex::new(r"channel\?team=([^&]+)&id=(C[A-Z0-9]+)").unwrap();

    // `>姓 名 (alias) (@handle)<`; the alias may not start with `@` so a bare
    // handle is never mistaken for one
    static ref CJK_NAME: Regex = Regex::new(
        r"(?x)
        >(?P<name>[一-龯ぁ-んァ-ヶ々ー]+\s+[一-龯ぁ-んァ-ヶ々ー]+)
        (?:\s+\((?P<alias>[^@)][^)]*)\))?
        (?:\s+\(@(?P<display>[^)]+)\))?
        <",
    )
    .unwrap();
    static ref WESTERN_NAME: Regex = Regex::new(r">([A-Z][a-z]+\s+[A-Z][a-z]+)<").unwrap();
    static ref WESTERN_SHAPE: Regex = Regex::new(r"[A-Z][a-z]+\s+[A-Z][a-z]+").unwrap();

    // Suffix forms first, then the 株式会社 prefix form
    static ref COMPANY_PATTERNS: Vec<Regex> = [
        r"([^\s<>]+株式会社)",
        r"([^\s<>]+興業)",
        r"([^\s<>]+工業)",
        r"([^\s<>]+商事)",
        r"([^\s<>]+産業)",
        r"(株式会社[^\s<>]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref CHANNEL_NAME: Regex = Regex::new(r">(🔒 )?#([^<]+)<").unwrap();
}

/// Channel-name prefixes kept verbatim
pub const KEPT_CHANNEL_PREFIXES: [&str; 3] = ["general", "random", "announce"];

/// Matches replaced by one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionInfo {
    pub pass: String,
    pub count: usize,
}

pub type PassFn = fn(&str, &mut Mapper) -> (String, usize);

#[derive(Clone, Copy)]
pub struct Pass {
    pub name: &'static str,
    pub apply: PassFn,
}

/// The standard passes, in the order they must run
pub const STANDARD_PASSES: [Pass; 5] = [
    Pass {
        name: "workspace_id",
        apply: anonymize_workspace_ids,
    },
    Pass {
        name: "member_link",
        apply: anonymize_member_links,
    },
    Pass {
        name: "personal_name",
        apply: anonymize_personal_names,
    },
    Pass {
        name: "company_name",
        apply: anonymize_company_names,
    },
    Pass {
        name: "channel_name",
        apply: anonymize_channel_names,
    },
];

/// Runs anonymization passes over whole documents
pub struct Redactor {
    passes: Vec<Pass>,
}

impl Redactor {
    pub fn new() -> Self {
        Self::with_passes(STANDARD_PASSES.to_vec())
    }

    pub fn with_passes(passes: Vec<Pass>) -> Self {
        Self { passes }
    }

    /// Anonymize `content`; every pass runs even when earlier ones matched nothing
    pub fn redact(&self, content: &str, mapper: &mut Mapper) -> (String, Vec<RedactionInfo>) {
        let mut result = content.to_string();
        let mut redactions = Vec::new();

        for pass in &self.passes {
            let (next, count) = (pass.apply)(&result, mapper);
            result = next;

            if count > 0 {
                redactions.push(RedactionInfo {
                    pass: pass.name.to_string(),
                    count,
                });
            }
        }

        (result, redactions)
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new()
    }
}

/// `team=T…` → `team=<dummy>`
pub fn anonymize_workspace_ids(text: &str, mapper: &mut Mapper) -> (String, usize) {
    let mut count = 0;
    let out = WORKSPACE_ID.replace_all(text, |caps: &Captures| {
        count += 1;
        format!("team={}", mapper.lookup_or_create(Category::WorkspaceId, &caps[1]))
    });
    (out.into_owned(), count)
}

/// `user?team=…&id=U…` and `channel?team=…&id=C…`
///
/// The team segment always becomes the first workspace dummy on record.
pub fn anonymize_member_links(text: &str, mapper: &mut Mapper) -> (String, usize) {
    let mut count = 0;
    let out = USER_LINK.replace_all(text, |caps: &Captures| {
        count += 1;
        let team = mapper.primary_workspace(&caps[1]);
        let id = mapper.lookup_or_create(Category::UserId, &caps[2]);
        format!("user?team={}&id={}", team, id)
    });
    let out = CHANNEL_LINK.replace_all(&out, |caps: &Captures| {
        count += 1;
        let team = mapper.primary_workspace(&caps[1]);
        let id = mapper.lookup_or_create(Category::ChannelId, &caps[2]);
        format!("channel?team={}&id={}", team, id)
    });
    (out.into_owned(), count)
}

/// Japanese names (with optional alias and handle), then Western two-word names
pub fn anonymize_personal_names(text: &str, mapper: &mut Mapper) -> (String, usize) {
    let mut count = 0;

    let out = CJK_NAME.replace_all(text, |caps: &Captures| {
        count += 1;
        let name = mapper.lookup_or_create(Category::PersonalName(NameStyle::Japanese), &caps["name"]);

        let alias = caps
            .name("alias")
            .map(|m| {
                let style = if WESTERN_SHAPE.is_match(m.as_str()) {
                    NameStyle::Western
                } else {
                    NameStyle::Japanese
                };
                format!(" ({})", mapper.lookup_or_create(Category::PersonalName(style), m.as_str()))
            })
            .unwrap_or_default();

        let display = caps
            .name("display")
            .map(|m| format!(" (@{})", display_label(mapper, m.as_str())))
            .unwrap_or_default();

        format!(">{}{}{}<", name, alias, display)
    });

    let out = WESTERN_NAME.replace_all(&out, |caps: &Captures| {
        count += 1;
        format!(
            ">{}<",
            mapper.lookup_or_create(Category::PersonalName(NameStyle::Western), &caps[1])
        )
    });

    (out.into_owned(), count)
}

/// Handles may carry a status note such as `tanaka(休暇中`; only the part
/// before the first `(` is replaced
fn display_label(mapper: &mut Mapper, handle: &str) -> String {
    match handle.split_once('(') {
        Some((base, rest)) => format!(
            "{}({}",
            mapper.lookup_or_create(Category::DisplayName, base.trim()),
            rest
        ),
        None => mapper.lookup_or_create(Category::DisplayName, handle),
    }
}

/// Six sweeps, one per corporate suffix/prefix form
pub fn anonymize_company_names(text: &str, mapper: &mut Mapper) -> (String, usize) {
    let mut count = 0;
    let mut out = text.to_string();

    for pattern in COMPANY_PATTERNS.iter() {
        out = pattern
            .replace_all(&out, |caps: &Captures| {
                count += 1;
                mapper.lookup_or_create(Category::CompanyName, &caps[1])
            })
            .into_owned();
    }

    (out, count)
}

/// `>#name<` and `>🔒 #name<`
///
/// Not recorded in the mapping tables; the output depends only on
/// [`channel_hash`] and the company table.
pub fn anonymize_channel_names(text: &str, mapper: &mut Mapper) -> (String, usize) {
    let mut count = 0;
    let companies: Vec<(String, String)> = mapper
        .companies()
        .map(|(real, dummy)| (real.to_string(), dummy.to_string()))
        .collect();

    let out = CHANNEL_NAME.replace_all(text, |caps: &Captures| {
        count += 1;
        let lock = caps.get(1).map_or("", |m| m.as_str());
        let name = anonymize_channel_name(&caps[2], &companies);
        format!(">{}#{}<", lock, name)
    });

    (out.into_owned(), count)
}

fn anonymize_channel_name(name: &str, companies: &[(String, String)]) -> String {
    let mut name = name.to_string();
    for (real, dummy) in companies {
        if name.contains(real.as_str()) {
            name = name.replace(real.as_str(), dummy);
        }
    }

    match name.split_once('-') {
        Some((prefix, _)) => {
            let prefix = if KEPT_CHANNEL_PREFIXES.contains(&prefix) {
                prefix.to_string()
            } else {
                format!("category{}", channel_hash(prefix) % 10)
            };
            format!("{}-project{}", prefix, channel_hash(&name) % 100)
        }
        None => format!("channel{}", channel_hash(&name) % 100),
    }
}

/// First eight bytes of the BLAKE3 digest, little-endian.
///
/// Fixed so channel names anonymize identically on every run and platform.
pub fn channel_hash(value: &str) -> u64 {
    let digest = blake3::hash(value.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{COMPANY_NAMES, FIRST_NAMES_EN, LAST_NAMES_EN, LAST_NAMES_JA};

    #[test]
    fn test_workspace_id() {
        let mut mapper = Mapper::with_seed(1);

        let (out, count) = anonymize_workspace_ids("slack://channel?team=T12345678AB&id=C1", &mut mapper);

        let dummy = mapper.lookup(Category::WorkspaceId, "T12345678AB").unwrap().to_string();
        assert_eq!(count, 1);
        assert_eq!(dummy.len(), 10);
        assert!(dummy.starts_with('T'));
        assert_eq!(out, format!("slack://channel?team={}&id=C1", dummy));
    }

    #[test]
    fn test_workspace_pass_is_not_output_aware() {
        let mut mapper = Mapper::with_seed(2);

        let (once, _) = anonymize_workspace_ids("team=T12345678AB", &mut mapper);
        let first_dummy = once.trim_start_matches("team=").to_string();
        let (twice, count) = anonymize_workspace_ids(&once, &mut mapper);

        // The dummy is treated as a fresh real value on a second sweep
        assert_eq!(count, 1);
        assert_ne!(twice, once);
        assert!(mapper.lookup(Category::WorkspaceId, &first_dummy).is_some());
    }

    #[test]
    fn test_short_workspace_id_ignored() {
        let mut mapper = Mapper::with_seed(3);
        let (out, count) = anonymize_workspace_ids("team=T1234", &mut mapper);
        assert_eq!(out, "team=T1234");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_member_links_use_first_workspace() {
        let mut mapper = Mapper::with_seed(4);
        let first = mapper.lookup_or_create(Category::WorkspaceId, "TAAAAAAAA");
        mapper.lookup_or_create(Category::WorkspaceId, "TBBBBBBBB");

        let input = "slack://user?team=TBBBBBBBB&id=U12345678 slack://channel?team=TBBBBBBBB&id=C12345678";
        let (out, count) = anonymize_member_links(input, &mut mapper);

        let user = mapper.lookup(Category::UserId, "U12345678").unwrap();
        let channel = mapper.lookup(Category::ChannelId, "C12345678").unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            out,
            format!(
                "slack://user?team={first}&id={user} slack://channel?team={first}&id={channel}"
            )
        );
    }

    #[test]
    fn test_member_links_without_known_workspace() {
        let mut mapper = Mapper::with_seed(5);

        let (out, _) = anonymize_member_links("user?team=your-workspace&id=U1", &mut mapper);

        let team = mapper.lookup(Category::WorkspaceId, "your-workspace").unwrap();
        assert!(out.starts_with(&format!("user?team={}&id=U", team)));
    }

    #[test]
    fn test_japanese_name_with_handle() {
        let mut mapper = Mapper::with_seed(6);
        let input = r#"<A HREF="x">田中 太郎 (@tanaka)</A><A HREF="y">田中 太郎 (@tanaka)</A>"#;

        let (out, count) = anonymize_personal_names(input, &mut mapper);

        let name = mapper.lookup(Category::PersonalName(NameStyle::Japanese), "田中 太郎").unwrap();
        let (last, _) = name.split_once(' ').unwrap();
        assert!(LAST_NAMES_JA.contains(&last));
        assert_eq!(count, 2);
        assert_eq!(
            out,
            format!(r#"<A HREF="x">{name} (@display_0)</A><A HREF="y">{name} (@display_0)</A>"#)
        );
    }

    #[test]
    fn test_japanese_name_with_alias() {
        let mut mapper = Mapper::with_seed(7);

        let (out, _) = anonymize_personal_names(">山田 花子 (Hanako Yamada) (@hanako)<", &mut mapper);

        let name = mapper.lookup(Category::DisplayName, "山田 花子").unwrap().to_string();
        let alias = mapper.lookup(Category::DisplayName, "Hanako Yamada").unwrap().to_string();
        let (first, last) = alias.split_once(' ').unwrap();
        assert!(FIRST_NAMES_EN.contains(&first) && LAST_NAMES_EN.contains(&last));
        assert_eq!(out, format!(">{} ({}) (@display_0)<", name, alias));
    }

    #[test]
    fn test_handle_with_status_note() {
        let mut mapper = Mapper::with_seed(8);

        let (out, _) = anonymize_personal_names(">佐藤 一郎 (@sato(休暇中)<", &mut mapper);

        assert!(out.ends_with(" (@display_0(休暇中)<"));
        assert_eq!(mapper.lookup(Category::DisplayName, "sato"), Some("display_0"));
    }

    #[test]
    fn test_western_name() {
        let mut mapper = Mapper::with_seed(9);

        let (out, count) = anonymize_personal_names("<A>John Doe</A><A>general</A>", &mut mapper);

        let dummy = mapper.lookup(Category::PersonalName(NameStyle::Western), "John Doe").unwrap();
        assert_eq!(count, 1);
        assert_eq!(out, format!("<A>{}</A><A>general</A>", dummy));
    }

    #[test]
    fn test_company_names() {
        let mut mapper = Mapper::with_seed(10);

        let (out, count) = anonymize_company_names("<p>山田商事</p><p>株式会社ヤマダ</p>", &mut mapper);

        assert!(count >= 2);
        assert!(mapper.lookup(Category::CompanyName, "山田商事").is_some());
        assert!(mapper.lookup(Category::CompanyName, "株式会社ヤマダ").is_some());
        assert!(!out.contains("山田") && !out.contains("ヤマダ"));
    }

    #[test]
    fn test_company_mapping_is_reused() {
        let mut mapper = Mapper::with_seed(11);

        let (out, _) = anonymize_company_names("山田工業 と 山田工業", &mut mapper);

        let dummy = mapper.lookup(Category::CompanyName, "山田工業").unwrap();
        assert!(COMPANY_NAMES.contains(&dummy));
        // Later sweeps may rewrite the dummy again, but always consistently
        let (left, right) = out.split_once(" と ").unwrap();
        assert_eq!(left, right);
        assert_ne!(left, "山田工業");
    }

    #[test]
    fn test_channel_without_hyphen() {
        let mut mapper = Mapper::with_seed(12);

        let (out, count) = anonymize_channel_names(">#general<", &mut mapper);

        assert_eq!(count, 1);
        assert_eq!(out, format!(">#channel{}<", channel_hash("general") % 100));
        assert!(mapper.table().is_empty());
    }

    #[test]
    fn test_channel_with_kept_prefix() {
        let mut mapper = Mapper::with_seed(13);

        let (out, _) = anonymize_channel_names(">🔒 #random-lunch<", &mut mapper);

        assert_eq!(
            out,
            format!(">🔒 #random-project{}<", channel_hash("random-lunch") % 100)
        );
    }

    #[test]
    fn test_channel_with_other_prefix() {
        let mut mapper = Mapper::with_seed(14);

        let (out, _) = anonymize_channel_names(">#sales-tokyo-2024<", &mut mapper);

        assert_eq!(
            out,
            format!(
                ">#category{}-project{}<",
                channel_hash("sales") % 10,
                channel_hash("sales-tokyo-2024") % 100
            )
        );
    }

    #[test]
    fn test_channel_company_substituted_before_hashing() {
        let mut mapper = Mapper::with_seed(15);
        let dummy = mapper.lookup_or_create(Category::CompanyName, "山田商事");

        let (out, _) = anonymize_channel_names(">#山田商事<", &mut mapper);

        assert_eq!(out, format!(">#channel{}<", channel_hash(&dummy) % 100));
    }

    #[test]
    fn test_channel_hash_is_stable() {
        assert_eq!(channel_hash("general"), channel_hash("general"));
        assert_ne!(channel_hash("general"), channel_hash("random"));
    }

    #[test]
    fn test_redactor_runs_all_passes() {
        let mut mapper = Mapper::with_seed(16);
        let html = concat!(
            r#"<DT><A HREF="slack://channel?team=T12345678&id=C12345678" ADD_DATE="1">#dev-ops</A>"#,
            "\n",
            r#"<DT><A HREF="slack://user?team=T12345678&id=U12345678" ADD_DATE="1">山口 次郎 (@yamaguchi)</A>"#,
        );

        let (out, info) = Redactor::new().redact(html, &mut mapper);

        let passes: Vec<&str> = info.iter().map(|i| i.pass.as_str()).collect();
        assert_eq!(passes, vec!["workspace_id", "member_link", "personal_name", "channel_name"]);
        for leaked in ["T12345678&", "C12345678", "U12345678", "山口 次郎", "yamaguchi", "dev-ops"] {
            assert!(!out.contains(leaked), "{} leaked in {}", leaked, out);
        }
    }

    #[test]
    fn test_redactor_no_matches() {
        let mut mapper = Mapper::with_seed(17);
        let content = "<p>nothing to see</p>";

        let (out, info) = Redactor::new().redact(content, &mut mapper);

        assert_eq!(out, content);
        assert!(info.is_empty());
        assert!(mapper.table().is_empty());
    }
}
