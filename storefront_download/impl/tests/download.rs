use std::fs;

use storefront_download_contracts::DownloadService;
use storefront_download_impl::DownloadServiceImpl;

#[tokio::test]
async fn saves_file() {
    let dir = tempfile::tempdir().unwrap();
    let sut = DownloadServiceImpl::new(dir.path());

    sut.download(b"{}".to_vec(), "contacto.json").await.unwrap();

    assert_eq!(fs::read(dir.path().join("contacto.json")).unwrap(), b"{}");
    assert_eq!(entries(dir.path()), ["contacto.json"]);
}

#[tokio::test]
async fn creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let downloads = dir.path().join("nested").join("downloads");
    let sut = DownloadServiceImpl::new(&downloads);

    sut.download(b"hello".to_vec(), "contacto.json").await.unwrap();

    assert_eq!(fs::read(downloads.join("contacto.json")).unwrap(), b"hello");
}

#[tokio::test]
async fn never_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let sut = DownloadServiceImpl::new(dir.path());

    sut.download(b"first".to_vec(), "contacto.json").await.unwrap();
    sut.download(b"second".to_vec(), "contacto.json").await.unwrap();
    sut.download(b"third".to_vec(), "contacto.json").await.unwrap();

    assert_eq!(
        entries(dir.path()),
        ["contacto (1).json", "contacto (2).json", "contacto.json"]
    );
    assert_eq!(fs::read(dir.path().join("contacto.json")).unwrap(), b"first");
    assert_eq!(
        fs::read(dir.path().join("contacto (1).json")).unwrap(),
        b"second"
    );
    assert_eq!(
        fs::read(dir.path().join("contacto (2).json")).unwrap(),
        b"third"
    );
}

#[tokio::test]
async fn rejects_invalid_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let sut = DownloadServiceImpl::new(dir.path());

    for file_name in ["", ".", "..", "../contacto.json", "a/b.json", "a\\b.json"] {
        let result = sut.download(b"{}".to_vec(), file_name).await;
        assert!(result.is_err(), "{file_name:?}");
    }

    assert!(entries(dir.path()).is_empty());
}

#[tokio::test]
async fn removes_partial_file_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let sut = DownloadServiceImpl::new(dir.path());
    // too long for a single path component, so only the final move fails
    let file_name = format!("{}.json", "a".repeat(300));

    let result = sut.download(b"{}".to_vec(), &file_name).await;

    assert!(result.is_err());
    assert!(entries(dir.path()).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_downloads_keep_every_artifact() {
    for _ in 0..20 {
        let dir = tempfile::tempdir().unwrap();
        let sut = DownloadServiceImpl::new(dir.path());
        let download = |byte| {
            let sut = sut.clone();
            tokio::spawn(async move { sut.download(vec![byte; 200_000], "contacto.json").await })
        };

        let (a, b) = (download(b'a'), download(b'b'));
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let names = entries(dir.path());
        assert_eq!(names, ["contacto (1).json", "contacto.json"]);
        let mut contents = names
            .iter()
            .map(|name| fs::read(dir.path().join(name)).unwrap())
            .collect::<Vec<_>>();
        contents.sort();
        assert_eq!(contents, [vec![b'a'; 200_000], vec![b'b'; 200_000]]);
    }
}

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut entries = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<_>>();
    entries.sort();
    entries
}
