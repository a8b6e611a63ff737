pub mod core;
pub mod analysis;
pub mod query;
pub mod index;
pub mod search;
pub mod parallel;

/*
┌──────────────────────────────────────────────────────────────────────────────────┐
│                           SEARCHDEX STRUCT ARCHITECTURE                           │
└──────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────────── CORE LAYER ──────────────────────────────────┐
│                                                                                  │
│  ┌────────────────────────────────────────────────────────────────────────────┐  │
│  │                           struct SearchServer                              │  │
│  │  config: Config                       // buckets, workers, request window  │  │
│  │  analyzer: Analyzer                   // tokenizer + stop words            │  │
│  │  index: InvertedIndex                 // forward + inverse tf maps         │  │
│  │  documents: BTreeMap<DocId, DocumentData> // rating + status               │  │
│  │  pool: rayon::ThreadPool              // runs every Parallel operation     │  │
│  └────────────────────────────────────────────────────────────────────────────┘  │
│                                                                                  │
│  ┌──────────────────┐  ┌──────────────────┐  ┌────────────────────────────────┐  │
│  │ struct Document  │  │ enum Document-   │  │ struct RequestQueue<'a>        │  │
│  │ • id: DocId      │  │   Status         │  │ • server: &'a SearchServer     │  │
│  │ • relevance: f64 │  │ • Actual         │  │ • requests: VecDeque<..>       │  │
│  │ • rating: i32    │  │ • Irrelevant     │  │ • no_result_requests: usize    │  │
│  └──────────────────┘  │ • Banned         │  └────────────────────────────────┘  │
│                        │ • Removed        │                                      │
│                        └──────────────────┘                                      │
└──────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── ANALYSIS / QUERY ────────────────────────────────┐
│  Analyzer ──► Tokenizer (WhitespaceTokenizer) ──► StopWordFilter                 │
│  QueryParser ──► QueryWord { data, is_minus, is_stop } ──► ParsedQuery           │
│                  { plus_words, minus_words }                                     │
└──────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── INDEX LAYER ───────────────────────────────────┐
│  TermArena: HashSet<Arc<str>>         // one allocation per distinct term        │
│  InvertedIndex                                                                   │
│  • word_to_document_freqs: BTreeMap<Term, BTreeMap<DocId, f64>>                  │
│  • document_to_word_freqs: BTreeMap<DocId, BTreeMap<Term, f64>>                  │
└──────────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────── PARALLEL LAYER ─────────────────────────────────┐
│  ConcurrentMap<K, V>: Vec<CachePadded<Mutex<BTreeMap<K, V>>>>   // key % buckets │
│  process_queries / process_queries_joined   // rayon fan-out, order preserved    │
└──────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── SEARCH LAYER ──────────────────────────────────┐
│  rank_documents     // relevance desc, rating on ties, top 5                     │
│  remove_duplicates  // same word set as a lower id => removed                    │
└──────────────────────────────────────────────────────────────────────────────────┘
*/
