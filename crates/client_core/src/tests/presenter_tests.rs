use super::*;

#[test]
fn idle_shows_nothing_and_enables_submit() {
    let outcome = SubmissionOutcome::Idle;
    let view = present(&outcome, false, None);
    assert_eq!(
        view.submit,
        SubmitButton {
            label: "Predict Diseases",
            enabled: true
        }
    );
    assert_eq!(view.result, ResultView::Hidden);
    assert_eq!(view.error, None);
}

#[test]
fn pending_disables_submit_and_relabels_it() {
    let outcome = SubmissionOutcome::Pending;
    let view = present(&outcome, true, None);
    assert_eq!(view.submit.label, "Predicting...");
    assert!(!view.submit.enabled);
    assert_eq!(view.result, ResultView::Hidden);
}

#[test]
fn disease_list_preserves_order_and_duplicates() {
    let outcome = SubmissionOutcome::Succeeded(Prediction::Diseases(vec![
        "Breast Cancer".into(),
        "Ovarian Cancer".into(),
        "Breast Cancer".into(),
    ]));
    let view = present(&outcome, false, None);
    let ResultView::DiseaseList { header, items } = view.result else {
        panic!("expected a disease list, got {:?}", view.result);
    };
    assert_eq!(header, "Predicted Diseases:");
    assert_eq!(items, ["Breast Cancer", "Ovarian Cancer", "Breast Cancer"]);
}

#[test]
fn message_is_rendered_verbatim() {
    let outcome = SubmissionOutcome::Succeeded(Prediction::Message("  No diseases predicted ".into()));
    let view = present(&outcome, false, None);
    assert_eq!(view.result, ResultView::Message("  No diseases predicted "));
}

#[test]
fn error_region_shows_the_given_notice() {
    let outcome = SubmissionOutcome::Failed("Invalid gene".into());
    let notice = ErrorNotice::Prediction("Invalid gene".into());
    let view = present(&outcome, false, Some(&notice));
    assert_eq!(view.error.as_deref(), Some("Invalid gene"));
    assert_eq!(view.result, ResultView::Hidden);

    let notice = ErrorNotice::Validation(ValidationError::UnsupportedFileType);
    let view = present(&outcome, false, Some(&notice));
    assert_eq!(view.error.as_deref(), Some("Please upload a FASTA or FA file"));
}

#[test]
fn unreadable_file_notice_names_the_reason() {
    let notice = ErrorNotice::UnreadableFile("permission denied".into());
    let view = present(&SubmissionOutcome::Idle, false, Some(&notice));
    assert_eq!(
        view.error.as_deref(),
        Some("Could not read file: permission denied")
    );
}

#[test]
fn validation_error_does_not_hide_a_result() {
    let outcome = SubmissionOutcome::Succeeded(Prediction::Message("ok".into()));
    let notice = ErrorNotice::Validation(ValidationError::FileTooLarge);
    let view = present(&outcome, false, Some(&notice));
    assert_eq!(view.error.as_deref(), Some("File size exceeds 200MB limit"));
    assert_eq!(view.result, ResultView::Message("ok"));
}
