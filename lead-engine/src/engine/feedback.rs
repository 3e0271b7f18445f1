use shared::models::{Feedback, MAX_FEEDBACKS_PER_LEAD, StoreEvent};

use super::{EngineError, EngineResult, LeadEngine, touch};

impl LeadEngine {
    /// Append a feedback entry to a lead's call history
    ///
    /// Rejected once the lead already holds [`MAX_FEEDBACKS_PER_LEAD`]
    /// entries, whoever the caller is.
    pub fn add_feedback(&mut self, lead_id: &str, text: impl Into<String>) -> EngineResult<Feedback> {
        let now = self.now();
        let Some(lead) = self.store.lead(lead_id) else {
            return Err(EngineError::LeadNotFound(lead_id.to_string()));
        };
        if !lead.has_feedback_capacity() {
            tracing::warn!(
                lead_id = %lead_id,
                max = MAX_FEEDBACKS_PER_LEAD,
                "Feedback rejected, limit reached"
            );
            return Err(EngineError::FeedbackLimitReached(lead_id.to_string()));
        }

        let feedback = Feedback {
            id: self.ids.next_feedback_id(now),
            text: text.into(),
            timestamp: now,
        };
        let lead = self
            .store
            .lead_mut(lead_id)
            .ok_or_else(|| EngineError::LeadNotFound(lead_id.to_string()))?;
        lead.feedbacks.push(feedback.clone());
        touch(lead, now);
        let count = lead.feedbacks.len();
        self.store.note_feedback_id(&feedback.id);

        tracing::info!(lead_id = %lead_id, feedback_id = %feedback.id, count, "Feedback added");
        self.emit(StoreEvent::FeedbackAdded {
            lead_id: lead_id.to_string(),
            feedback_id: feedback.id.clone(),
        });
        Ok(feedback)
    }

    /// Replace the text of one entry; id and timestamp are kept
    pub fn edit_feedback(
        &mut self,
        lead_id: &str,
        feedback_id: &str,
        text: impl Into<String>,
    ) -> EngineResult<Feedback> {
        let now = self.now();
        let lead = self
            .store
            .lead_mut(lead_id)
            .ok_or_else(|| EngineError::LeadNotFound(lead_id.to_string()))?;
        let Some(entry) = lead.find_feedback_mut(feedback_id) else {
            tracing::warn!(lead_id = %lead_id, feedback_id = %feedback_id, "Edit skipped, feedback not found");
            return Err(EngineError::FeedbackNotFound {
                lead_id: lead_id.to_string(),
                feedback_id: feedback_id.to_string(),
            });
        };
        entry.text = text.into();
        let edited = entry.clone();
        touch(lead, now);

        tracing::info!(lead_id = %lead_id, feedback_id = %feedback_id, "Feedback edited");
        self.emit(StoreEvent::FeedbackEdited {
            lead_id: lead_id.to_string(),
            feedback_id: feedback_id.to_string(),
        });
        Ok(edited)
    }

    pub fn delete_feedback(&mut self, lead_id: &str, feedback_id: &str) -> EngineResult<Feedback> {
        let now = self.now();
        let lead = self
            .store
            .lead_mut(lead_id)
            .ok_or_else(|| EngineError::LeadNotFound(lead_id.to_string()))?;
        let Some(pos) = lead.feedbacks.iter().position(|f| f.id == feedback_id) else {
            return Err(EngineError::FeedbackNotFound {
                lead_id: lead_id.to_string(),
                feedback_id: feedback_id.to_string(),
            });
        };
        let removed = lead.feedbacks.remove(pos);
        touch(lead, now);

        tracing::info!(lead_id = %lead_id, feedback_id = %feedback_id, "Feedback deleted");
        self.emit(StoreEvent::FeedbackDeleted {
            lead_id: lead_id.to_string(),
            feedback_id: feedback_id.to_string(),
        });
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn one_lead(engine: &mut LeadEngine) -> String {
        engine.bulk_ingest(rows(&["A"])).created.remove(0)
    }

    #[test]
    fn test_fourth_feedback_is_rejected() {
        let (mut engine, clock) = engine_at(T0);
        let id = one_lead(&mut engine);
        for i in 0..3 {
            clock.advance(1);
            engine.add_feedback(&id, format!("call {i}")).unwrap();
        }
        let before = engine.store().lead(&id).unwrap().clone();

        let result = engine.add_feedback(&id, "one more");
        assert_eq!(result, Err(EngineError::FeedbackLimitReached(id.clone())));
        assert_eq!(engine.store().lead(&id).unwrap(), &before);
        assert_eq!(before.feedbacks.len(), MAX_FEEDBACKS_PER_LEAD);
    }

    #[test]
    fn test_feedback_keeps_insertion_order() {
        let (mut engine, clock) = engine_at(T0);
        let id = one_lead(&mut engine);
        let first = engine.add_feedback(&id, "first").unwrap();
        clock.advance(100);
        let second = engine.add_feedback(&id, "second").unwrap();

        let lead = engine.store().lead(&id).unwrap();
        assert_eq!(lead.feedbacks, vec![first.clone(), second.clone()]);
        assert_eq!(second.timestamp, T0 + 100);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_edit_replaces_text_only() {
        let (mut engine, clock) = engine_at(T0);
        let id = one_lead(&mut engine);
        let original = engine.add_feedback(&id, "no answer").unwrap();
        clock.advance(500);

        let edited = engine.edit_feedback(&id, &original.id, "answered, call back").unwrap();
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.timestamp, original.timestamp);
        assert_eq!(edited.text, "answered, call back");
        assert_eq!(engine.store().lead(&id).unwrap().updated_at, T0 + 500);
    }

    #[test]
    fn test_edit_unknown_feedback_changes_nothing() {
        let (mut engine, _clock) = engine_at(T0);
        let id = one_lead(&mut engine);
        engine.add_feedback(&id, "kept").unwrap();
        let before = engine.store().lead(&id).unwrap().clone();

        let result = engine.edit_feedback(&id, "F0-0", "changed");
        assert!(matches!(result, Err(EngineError::FeedbackNotFound { .. })));
        assert_eq!(engine.store().lead(&id).unwrap(), &before);

        let result = engine.edit_feedback("L0-0", "F0-0", "changed");
        assert_eq!(result, Err(EngineError::LeadNotFound("L0-0".into())));
    }

    #[test]
    fn test_delete_frees_capacity() {
        let (mut engine, _clock) = engine_at(T0);
        let id = one_lead(&mut engine);
        let entries: Vec<_> = (0..3)
            .map(|i| engine.add_feedback(&id, format!("n{i}")).unwrap())
            .collect();

        let removed = engine.delete_feedback(&id, &entries[1].id).unwrap();
        assert_eq!(removed, entries[1]);
        assert_eq!(engine.store().lead(&id).unwrap().feedbacks.len(), 2);
        assert!(engine.add_feedback(&id, "again").is_ok());

        assert!(matches!(
            engine.delete_feedback(&id, &entries[1].id),
            Err(EngineError::FeedbackNotFound { .. })
        ));
    }
}
