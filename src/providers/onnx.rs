//! Local ONNX sentence embedder
//!
//! Runs all-MiniLM-L6-v2 (or a compatible sentence-transformers model) with
//! mean pooling and L2 normalization, so inner products between embeddings
//! are cosine similarities.

use async_trait::async_trait;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;
use std::path::Path;
use tokenizers::Tokenizer;

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;

/// ONNX-based text embedder, one shared instance per process
pub struct OnnxEmbedder {
    /// ONNX Runtime session; inference takes `&mut`, so the shared instance
    /// serializes calls through a mutex
    session: Mutex<Session>,
    /// HuggingFace tokenizer
    tokenizer: Tokenizer,
    /// Embedding dimensions
    dimensions: usize,
    /// Maximum sequence length
    max_length: usize,
    /// Batch size
    batch_size: usize,
}

impl OnnxEmbedder {
    /// Create a new embedder, downloading model files on first use
    pub async fn new(config: &EmbeddingConfig) -> Result<Self> {
        tracing::info!("Initializing ONNX embedder with model: {}", config.model);

        std::fs::create_dir_all(&config.cache_dir)
            .map_err(|e| Error::Config(format!("Failed to create cache directory: {}", e)))?;

        let model_path = config.cache_dir.join("model.onnx");
        let tokenizer_path = config.cache_dir.join("tokenizer.json");

        if !model_path.exists() {
            download_model_file(&config.model, "onnx/model.onnx", &model_path).await?;
        }
        if !tokenizer_path.exists() {
            download_model_file(&config.model, "tokenizer.json", &tokenizer_path).await?;
        }

        let session = Session::builder()
            .map_err(|e| Error::embedding(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::embedding(format!("Failed to set optimization level: {}", e)))?
            .with_intra_threads(4)
            .map_err(|e| Error::embedding(format!("Failed to set threads: {}", e)))?
            .commit_from_file(&model_path)
            .map_err(|e| Error::embedding(format!("Failed to load model: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::embedding(format!("Failed to load tokenizer: {}", e)))?;

        tracing::info!("ONNX embedder initialized ({} dims)", config.dimensions);

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            dimensions: config.dimensions,
            max_length: config.max_length,
            batch_size: config.batch_size,
        })
    }

    /// Embed texts in configured-size batches
    fn embed_texts(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            all.extend(self.run_batch(batch)?);
        }
        Ok(all)
    }

    /// Tokenize, run inference, mean-pool, and normalize one batch
    fn run_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let batch_size = texts.len();

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| Error::embedding(format!("Tokenization failed: {}", e)))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(self.max_length);

        let mut input_ids = vec![0i64; batch_size * max_len];
        let mut attention_mask = vec![0i64; batch_size * max_len];
        let mut token_type_ids = vec![0i64; batch_size * max_len];

        for (i, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let types = encoding.get_type_ids();
            let len = ids.len().min(max_len);

            for j in 0..len {
                input_ids[i * max_len + j] = ids[j] as i64;
                attention_mask[i * max_len + j] = mask[j] as i64;
                token_type_ids[i * max_len + j] = types[j] as i64;
            }
        }

        let input_ids_tensor = Tensor::from_array((
            vec![batch_size, max_len],
            input_ids.into_boxed_slice(),
        ))
        .map_err(|e| Error::embedding(format!("Input tensor creation failed: {}", e)))?;

        let attention_mask_tensor = Tensor::from_array((
            vec![batch_size, max_len],
            attention_mask.clone().into_boxed_slice(),
        ))
        .map_err(|e| Error::embedding(format!("Attention mask tensor creation failed: {}", e)))?;

        let token_type_ids_tensor = Tensor::from_array((
            vec![batch_size, max_len],
            token_type_ids.into_boxed_slice(),
        ))
        .map_err(|e| Error::embedding(format!("Token type tensor creation failed: {}", e)))?;

        let inputs = vec![
            ("input_ids", input_ids_tensor.into_dyn()),
            ("attention_mask", attention_mask_tensor.into_dyn()),
            ("token_type_ids", token_type_ids_tensor.into_dyn()),
        ];

        let mut session = self.session.lock();
        let outputs = session
            .run(inputs)
            .map_err(|e| Error::embedding(format!("Inference failed: {}", e)))?;

        let output_iter: Vec<_> = outputs.iter().collect();
        let output = output_iter
            .iter()
            .find(|(name, _)| *name == "last_hidden_state")
            .or_else(|| output_iter.first())
            .map(|(_, v)| v)
            .ok_or_else(|| Error::embedding("No output tensor"))?;

        let (tensor_shape, tensor_data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::embedding(format!("Failed to extract tensor: {}", e)))?;

        let dims: Vec<usize> = tensor_shape.iter().map(|&d| d as usize).collect();
        let hidden_size = dims.get(2).copied().unwrap_or(self.dimensions);

        Ok(mean_pool_normalized(
            tensor_data,
            &attention_mask,
            batch_size,
            max_len,
            hidden_size,
        ))
    }
}

/// Mean-pool token states with the attention mask, then L2-normalize each row
fn mean_pool_normalized(
    hidden: &[f32],
    attention_mask: &[i64],
    batch_size: usize,
    seq_len: usize,
    hidden_size: usize,
) -> Vec<Vec<f32>> {
    let mut embeddings = Vec::with_capacity(batch_size);

    for i in 0..batch_size {
        let mut sum = vec![0.0f32; hidden_size];
        let mut count = 0.0f32;

        for j in 0..seq_len {
            let mask_val = attention_mask[i * seq_len + j] as f32;
            if mask_val > 0.0 {
                for (k, acc) in sum.iter_mut().enumerate() {
                    let idx = i * seq_len * hidden_size + j * hidden_size + k;
                    if idx < hidden.len() {
                        *acc += hidden[idx] * mask_val;
                    }
                }
                count += mask_val;
            }
        }

        if count > 0.0 {
            for val in &mut sum {
                *val /= count;
            }
        }

        let norm: f32 = sum.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut sum {
                *val /= norm;
            }
        }

        embeddings.push(sum);
    }

    embeddings
}

#[async_trait]
impl EmbeddingProvider for OnnxEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_texts(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("Empty embedding result"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        self.embed_texts(&refs)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

/// Download one model file from the sentence-transformers HF repo
async fn download_model_file(model_name: &str, remote: &str, path: &Path) -> Result<()> {
    let url = format!(
        "https://huggingface.co/sentence-transformers/{}/resolve/main/{}",
        model_name, remote
    );

    tracing::info!("Downloading {} from: {}", remote, url);

    let response = reqwest::get(&url)
        .await
        .map_err(|e| Error::embedding(format!("Failed to download {}: {}", remote, e)))?;

    if !response.status().is_success() {
        return Err(Error::embedding(format!(
            "Download of {} failed: HTTP {}",
            remote,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::embedding(format!("Failed to read {}: {}", remote, e)))?;

    std::fs::write(path, &bytes)
        .map_err(|e| Error::embedding(format!("Failed to save {}: {}", remote, e)))?;

    tracing::info!("Downloaded {} ({} bytes)", remote, bytes.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_pooling_ignores_masked_positions() {
        // batch of 1, seq_len 3, hidden 2; last position masked out
        let hidden = vec![1.0, 0.0, 3.0, 0.0, 100.0, 100.0];
        let mask = vec![1i64, 1, 0];
        let rows = mean_pool_normalized(&hidden, &mask, 1, 3, 2);

        assert_eq!(rows.len(), 1);
        // mean of (1,0) and (3,0) is (2,0); normalized to (1,0)
        assert!((rows[0][0] - 1.0).abs() < 1e-6);
        assert!(rows[0][1].abs() < 1e-6);
    }

    #[test]
    fn rows_are_unit_length() {
        let hidden = vec![3.0, 4.0];
        let mask = vec![1i64];
        let rows = mean_pool_normalized(&hidden, &mask, 1, 1, 2);
        let norm: f32 = rows[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn all_masked_row_stays_zero() {
        let hidden = vec![5.0, 5.0];
        let mask = vec![0i64];
        let rows = mean_pool_normalized(&hidden, &mask, 1, 1, 2);
        assert_eq!(rows[0], vec![0.0, 0.0]);
    }
}
