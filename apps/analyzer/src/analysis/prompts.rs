// Prompt text for resume analysis. Only the two input texts are substituted.

/// Builds the scoring prompt, embedding both texts verbatim.
pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an expert resume analyzer. Your task is to evaluate a given resume against a job description and provide a compatibility score.
The score should be out of 100, where 100 means a perfect match.
Focus on key job-relevant attributes such as skills, experience, education, keywords, and overall relevance.

Provide a brief justification for the score, highlighting strengths and areas for improvement.

Resume :
-----
{resume_text}

Job Description :
-----
{job_description}

Please provide the output in JSON format with the following structure:

{{
    "score": <integer, score out of 100>,
    "justification": "<string, brief explanation>"
}}
"#
    )
}
