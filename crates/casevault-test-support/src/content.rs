//! Content fixtures — a small case pack shared by session and API tests.

use casevault_content::pack::CasePack;

const MINI_PACK: &str = r#"
site:
  brand: TEST VAULT
  division: Test Division
  tagline: Reading Room
cases:
  - id: 1
    title: First File
    case_number: T-001
    date: "1947"
    location: Nowhere, NM
    classification: DECLASSIFIED
    summary: The first test case.
    scenes:
      entry: start
      nodes:
        - id: start
          title: Opening
          body: OPEN FILE.
          choices:
            - label: Continue
              target: end
        - id: end
          title: Closing
          body: CLOSED.
          ending:
            unlock_reward: Field Reports
  - id: 2
    title: Second File
    case_number: T-002
    date: "1952"
    location: Elsewhere, OH
    classification: RESTRICTED
    summary: The second test case.
    scenes:
      entry: start
      nodes:
        - id: start
          title: Opening
          body: SECOND FILE.
          choices:
            - label: Continue
              target: end
        - id: end
          title: Closing
          body: DONE.
          ending:
            unlock_reward: Blue Book Files
categories:
  - id: test-cat
    title: Test Category
    description: Documents used by the test suite.
    files: 3
    status: UNCLASSIFIED
    date_range: 1947-1952
recent_documents:
  - name: TEST-0001.pdf
    date: 2024-01-01
    pages: 2
    classification: UNCLASSIFIED
"#;

/// A two-case pack where both cases are playable; completing case 1
/// unlocks case 2.
///
/// # Panics
///
/// Never panics; the fixture pack is valid by construction.
#[must_use]
pub fn mini_pack() -> CasePack {
    CasePack::from_yaml(MINI_PACK).expect("fixture pack is valid")
}
