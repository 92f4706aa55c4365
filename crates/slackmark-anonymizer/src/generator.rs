//! Dummy value generation
//!
//! Stateless apart from the caller's RNG. IDs are not checked for
//! collisions; with 36^9 suffixes the odds are negligible at bookmark-file
//! scale.

use rand::Rng;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const ID_SUFFIX_LEN: usize = 9;

pub const FIRST_NAMES_EN: &[&str] = &[
    "John", "Emma", "Michael", "Olivia", "William", "Sophia", "James", "Ava", "Robert", "Mia",
];
pub const LAST_NAMES_EN: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson", "Anderson",
    "Taylor",
];
pub const FIRST_NAMES_JA: &[&str] = &[
    "太郎", "花子", "一郎", "美咲", "健太", "さくら", "大輔", "恵子", "裕子", "直樹",
];
pub const LAST_NAMES_JA: &[&str] = &[
    "佐藤", "鈴木", "田中", "高橋", "伊藤", "渡辺", "山本", "中村", "小林", "加藤",
];
pub const COMPANY_NAMES: &[&str] = &[
    "サンプル株式会社",
    "テスト産業",
    "デモテクノロジー",
    "サンプルコーポレーション",
    "ABC商事",
    "XYZ工業",
    "架空電機",
    "モデル物産",
    "サンプルフーズ",
    "テストメディア",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Workspace,
    User,
    Channel,
}

impl IdKind {
    pub fn prefix(&self) -> char {
        match self {
            IdKind::Workspace => 'T',
            IdKind::User => 'U',
            IdKind::Channel => 'C',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameStyle {
    /// Surname first, from the Japanese pools
    Japanese,
    /// Given name first, from the Western pools
    Western,
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Type prefix followed by nine uppercase alphanumerics
pub fn dummy_id<R: Rng + ?Sized>(rng: &mut R, kind: IdKind) -> String {
    let mut id = String::with_capacity(ID_SUFFIX_LEN + 1);
    id.push(kind.prefix());
    for _ in 0..ID_SUFFIX_LEN {
        id.push(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char);
    }
    id
}

pub fn dummy_name<R: Rng + ?Sized>(rng: &mut R, style: NameStyle) -> String {
    match style {
        NameStyle::Japanese => {
            let last = pick(rng, LAST_NAMES_JA);
            let first = pick(rng, FIRST_NAMES_JA);
            format!("{} {}", last, first)
        }
        NameStyle::Western => {
            let first = pick(rng, FIRST_NAMES_EN);
            let last = pick(rng, LAST_NAMES_EN);
            format!("{} {}", first, last)
        }
    }
}

pub fn dummy_company<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, COMPANY_NAMES).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in [IdKind::Workspace, IdKind::User, IdKind::Channel] {
            let id = dummy_id(&mut rng, kind);
            assert_eq!(id.len(), 10);
            assert!(id.starts_with(kind.prefix()));
            assert!(id[1..].bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(dummy_id(&mut a, IdKind::User), dummy_id(&mut b, IdKind::User));
        assert_eq!(dummy_name(&mut a, NameStyle::Japanese), dummy_name(&mut b, NameStyle::Japanese));
        assert_eq!(dummy_company(&mut a), dummy_company(&mut b));
    }

    #[test]
    fn test_name_order() {
        let mut rng = StdRng::seed_from_u64(3);

        let ja = dummy_name(&mut rng, NameStyle::Japanese);
        let (last, first) = ja.split_once(' ').unwrap();
        assert!(LAST_NAMES_JA.contains(&last));
        assert!(FIRST_NAMES_JA.contains(&first));

        let en = dummy_name(&mut rng, NameStyle::Western);
        let (first, last) = en.split_once(' ').unwrap();
        assert!(FIRST_NAMES_EN.contains(&first));
        assert!(LAST_NAMES_EN.contains(&last));
    }

    #[test]
    fn test_company_from_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        let company = dummy_company(&mut rng);
        assert!(COMPANY_NAMES.contains(&company.as_str()));
    }
}
