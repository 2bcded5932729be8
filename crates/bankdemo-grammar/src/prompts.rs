//! Audio prompt table
//!
//! Maps page keys to the WAV files the native bridge plays. Playback
//! itself is the bridge's concern; this side only decides which prompt
//! a situation calls for.

/// Page key to prompt file.
pub const PROMPTS: [(&str, &str); 10] = [
    ("mainmenu", "RT_Menu_01.wav"),
    ("payment", "MakeAPayment.wav"),
    ("acctfrom", "SelectPaymentAccount.wav"),
    ("acctadd", "AddNewAccount.wav"),
    ("rt-01", "RT_RecentTransactions_01.wav"),
    ("rt-02", "RT_RecentTransactions_02.wav"),
    ("rt-03", "RT_RecentTransactions_03.wav"),
    ("rt-detail-01", "RT_TransactionDetails_01.wav"),
    ("rt-detail-02", "RT_TransactionDetails_02.wav"),
    ("rt-detail-03", "RT_TransactionDetails_03.wav"),
];

/// The prompt file for a page key, if one is defined.
pub fn prompt_file(page: &str) -> Option<&'static str> {
    PROMPTS
        .iter()
        .find(|(key, _)| *key == page)
        .map(|(_, file)| *file)
}

/// The recent-transactions prompt for a running recognition error count:
/// the first miss gets a gentle reprompt, repeated misses the longer help.
pub fn reco_error_prompt(errors: u32) -> &'static str {
    if errors <= 1 {
        "rt-02"
    } else {
        "rt-03"
    }
}
