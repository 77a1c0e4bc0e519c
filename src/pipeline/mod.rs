pub mod symptom_extraction;
