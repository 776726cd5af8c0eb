use crate::domain::{Corpus, CorpusEntry};

/// Built-in miniature dataset used when the primary CSV cannot be loaded.
///
/// This is an operational default, not part of the matching engine: the
/// session built over it behaves exactly like one built over the real
/// dataset, just with a much smaller corpus.
pub fn sample_corpus() -> Corpus {
    let entries = [
        (
            "How can I check the status of my pension application?",
            "You can check your pension application status by visiting the DARPG portal (https://pgportal.gov.in) and entering your registration number. Alternatively, you can call the pension helpline at 1800-11-1960.",
        ),
        (
            "What documents are required to file a pension grievance?",
            "To file a pension grievance, you'll need: 1) Your pension ID/PPO number, 2) Identity proof (Aadhaar/PAN/Voter ID), 3) Details of previous correspondence with the pension department, 4) Any supporting documents related to your grievance.",
        ),
        (
            "Why is my pension payment delayed?",
            "Pension payments can be delayed due to several reasons: 1) Bank account verification issues, 2) Incomplete life certificate submission, 3) Technical problems in the disbursement system, or 4) Administrative processing delays. Please provide your pension ID for specific assistance.",
        ),
        (
            "How do I update my bank details for pension disbursal?",
            "To update your bank details for pension disbursal, submit Form 14 to your pension disbursing authority along with a canceled cheque or bank passbook copy. For online updates, visit the pension portal and navigate to the 'Update Bank Details' section under your profile.",
        ),
        (
            "What should I do if the DARPG portal is not working?",
            "If the DARPG portal is not working, you can: 1) Try again after some time as it might be under maintenance, 2) Use alternative browsers, 3) Clear your browser cache, or 4) Contact the technical support at helpdesk-darpg@gov.in or call 1800-11-1960.",
        ),
    ];

    let entries = entries
        .iter()
        .filter_map(|(query, answer)| CorpusEntry::new(*query, *answer))
        .collect();

    Corpus::new(entries).expect("built-in sample corpus is non-empty")
}
