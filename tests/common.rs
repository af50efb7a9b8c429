use std::fs;
use std::path::Path;

/// 在 `root/name` 建立資料集目錄並寫入檔案
pub fn write_dataset(root: &Path, name: &str, files: &[(&str, &str)]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("Failed to create dataset directory");
    for (file, contents) in files {
        fs::write(dir.join(file), contents).expect("Failed to write dataset file");
    }
}

/// 標準的小型商品資料集：左右表欄位部分重疊
pub fn products_dataset(root: &Path, name: &str) {
    write_dataset(
        root,
        name,
        &[
            ("left.csv", "id,name,brand\n1,runner,acme\n2,boot,\n"),
            ("right.csv", "id,name,price\n10,Runner X,59.99\n20,\"Boot, tall\",\n"),
            ("train.csv", "0,0,1\n1,1,1\n0,1,0\n"),
            ("test.csv", "1,0,0\n"),
            ("valid.csv", "1,1,1\n"),
        ],
    );
}
